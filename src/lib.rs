//! SXP (SGT Exchange Protocol) legacy codec
//!
//! This library encodes and decodes the version 1-3 SXP wire format. It turns
//! a binding database snapshot into framed Update messages, builds the
//! Open/OpenResp/Error control messages, and parses received frames back into
//! typed, immutable messages.
//!
//! # Quick Start
//!
//! ```rust
//! use sxp_legacy::{Binding, BindingTree, PrefixGroup, Source, UpdateOptions, Version};
//!
//! let tree = BindingTree::new().with_source(
//!     Source::new().with_group(
//!         PrefixGroup::new(100).with_binding(Binding::add("10.0.0.1/32".parse().unwrap())),
//!     ),
//! );
//!
//! // Encode an Update for a version 1 peer
//! let bytes = sxp_legacy::encode_update(&tree, &UpdateOptions::new(Version::V1))?
//!     .expect("one binding qualifies");
//!
//! // Decode it back
//! let message = sxp_legacy::decode(bytes)?;
//! assert_eq!(message.records().map(|records| records.len()), Some(1));
//! # Ok::<(), sxp_legacy::Error>(())
//! ```
//!
//! # Features
//!
//! - **Per-version admissibility** - bindings a peer's version cannot express are skipped
//! - **Incremental updates** - changed-only encoding for delta updates
//! - **Strict decoding** - length mismatches and malformed TLVs abort the whole message
//! - **Zero-copy payloads** - decoded messages share the received `Bytes`
//!
//! The codec is pure: no I/O, no shared state, no logging of failures.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Action, Binding, BindingTree, ConnectionMode, Error, ErrorCode, HEADER_SIZE,
    MAX_ERROR_DATA_LEN, MappingRecord, Message, MessageBody, MessageType, PrefixGroup, Result,
    Sgt, Source, UpdateOptions, Version, decode, encode_error, encode_open, encode_open_resp,
    encode_purge_all, encode_update, is_legacy,
};
