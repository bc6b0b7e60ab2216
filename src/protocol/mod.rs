//! Legacy SXP protocol core implementation
//!
//! This module provides the wire format, message types, and codec for SXP
//! versions 1 through 3.

mod attribute;
mod binding;
mod codec;
mod control;
mod error;
mod header;
mod message;
mod policy;
mod record;
mod record_list;
mod types;

pub use attribute::{Attribute, AttributeType};
pub use binding::{Action, Binding, BindingTree, PrefixGroup, Sgt, Source};
pub use codec::{
    UpdateOptions, decode, decode_error, decode_open, decode_open_resp, decode_purge_all,
    decode_update, encode_error, encode_open, encode_open_resp, encode_purge_all, encode_update,
};
pub use control::{ErrorBody, OpenBody};
pub use error::{Error, Result};
pub use header::{MessageHeader, frame, unframe};
pub(crate) use header::frame_control;
pub use message::{Message, MessageBody};
pub use policy::{FamilyRule, VersionPolicy, action_filter, changed_filter, is_legacy};
pub use record::{MappingRecord, Opcode};
pub use record_list::MappingRecordList;
pub use types::{ConnectionMode, ErrorCode, MessageType, Version};

/// Width of the message length field in bytes
pub const MESSAGE_HEADER_LENGTH_LENGTH: usize = 4;

/// Width of the message type field in bytes
pub const MESSAGE_HEADER_TYPE_LENGTH: usize = 4;

/// Header size in bytes (length field + type field)
pub const HEADER_SIZE: usize = MESSAGE_HEADER_LENGTH_LENGTH + MESSAGE_HEADER_TYPE_LENGTH;

/// Largest payload whose total length still fits the 32-bit length field
pub const MAX_PAYLOAD_SIZE: usize = u32::MAX as usize - HEADER_SIZE;

/// Size of an Open/OpenResp body (version + mode)
pub const OPEN_BODY_SIZE: usize = 8;

/// Size of the fixed part of an Error body (3 reserved bytes + code)
pub const ERROR_BODY_SIZE: usize = 4;

/// Upper bound on the variable data carried by an Error message
pub const MAX_ERROR_DATA_LEN: usize = 10;

/// Size of a mapping record header (opcode + length)
pub const RECORD_HEADER_SIZE: usize = 8;

/// Size of a TLV header (type + length)
pub const TLV_HEADER_SIZE: usize = 8;
