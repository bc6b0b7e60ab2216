//! SXP legacy message codec (encode/decode)
//!
//! Encoders return a ready-to-send buffer holding exactly one framed message.
//! [`decode`] takes a buffer holding exactly one framed message and dispatches
//! the payload on the header's message type.

use bytes::{Bytes, BytesMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    BindingTree, ConnectionMode, Error, ErrorBody, ErrorCode, HEADER_SIZE, MappingRecordList,
    Message, MessageBody, MessageHeader, MessageType, OpenBody, Result, Version, frame_control,
    unframe,
};

/// Options for building an Update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateOptions {
    version: Version,
    changed_only: bool,
}

impl UpdateOptions {
    /// Full snapshot for a peer speaking `version`
    #[must_use]
    pub const fn new(version: Version) -> Self {
        Self {
            version,
            changed_only: false,
        }
    }

    /// Only carry bindings flagged as changed
    #[must_use]
    pub const fn changed_only(mut self, changed_only: bool) -> Self {
        self.changed_only = changed_only;
        self
    }

    /// Get target version
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Check if only changed bindings are carried
    #[must_use]
    pub const fn is_changed_only(&self) -> bool {
        self.changed_only
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self::new(Version::V3)
    }
}

/// Encode an Open message
#[must_use]
pub fn encode_open(version: Version, mode: ConnectionMode) -> Bytes {
    frame_control(MessageType::Open, &OpenBody::new(version, mode).to_bytes())
}

/// Encode an OpenResp message
#[must_use]
pub fn encode_open_resp(version: Version, mode: ConnectionMode) -> Bytes {
    frame_control(MessageType::OpenResp, &OpenBody::new(version, mode).to_bytes())
}

/// Encode an Error message
///
/// # Errors
///
/// Returns [`Error::ErrorDataTooLong`] if `data` exceeds 10 bytes.
pub fn encode_error(code: ErrorCode, data: &[u8]) -> Result<Bytes> {
    let body = ErrorBody::new(code, data)?;
    Ok(frame_control(MessageType::Error, &body.to_bytes()))
}

/// Encode a PurgeAll message
#[must_use]
pub fn encode_purge_all() -> Bytes {
    frame_control(MessageType::PurgeAll, &[])
}

/// Encode an Update carrying every binding in `tree` admitted by `options`
///
/// Returns `Ok(None)` when no binding qualifies; an empty Update must not be
/// sent.
///
/// # Errors
///
/// Returns an error if:
/// - The target version has no legacy rules ([`Error::UnsupportedTarget`])
/// - The records do not fit one message ([`Error::PayloadTooLarge`])
#[instrument(level = "trace", skip(tree))]
pub fn encode_update(tree: &BindingTree, options: &UpdateOptions) -> Result<Option<Bytes>> {
    let records = MappingRecordList::from_tree(tree, options)?;
    if records.is_empty() {
        debug!(version = %options.version(), "no bindings to send");
        return Ok(None);
    }

    let payload_len = records.encoded_len();
    let header = MessageHeader::new(MessageType::Update, payload_len)?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload_len);
    buf.extend_from_slice(&header.to_bytes());
    records.encode(&mut buf);

    debug!(
        version = %options.version(),
        records = records.len(),
        bytes = buf.len(),
        "encoded update"
    );
    Ok(Some(buf.freeze()))
}

/// Decode an Open payload
pub fn decode_open(payload: Bytes) -> Result<Message> {
    let body = OpenBody::decode_open(&payload)?;
    Message::from_parts(payload, MessageBody::Open(body))
}

/// Decode an OpenResp payload
///
/// # Errors
///
/// Returns [`Error::IncompatiblePeerVersion`] if the peer's version is not legacy.
pub fn decode_open_resp(payload: Bytes) -> Result<Message> {
    let body = OpenBody::decode_open_resp(&payload)?;
    Message::from_parts(payload, MessageBody::OpenResp(body))
}

/// Decode an Error payload
pub fn decode_error(payload: Bytes) -> Result<Message> {
    let body = ErrorBody::decode(payload.clone())?;
    Message::from_parts(payload, MessageBody::Error(body))
}

/// Decode an Update payload
///
/// # Errors
///
/// Returns the first mapping record error; no partial update is produced.
#[instrument(level = "trace", skip(payload), fields(len = payload.len()))]
pub fn decode_update(payload: Bytes) -> Result<Message> {
    let records = MappingRecordList::decode(payload.clone())?;
    Message::from_parts(payload, MessageBody::Update(records))
}

/// Decode a PurgeAll payload
pub fn decode_purge_all(payload: Bytes) -> Result<Message> {
    if !payload.is_empty() {
        return Err(Error::TrailingData {
            context: "purge-all",
            extra: payload.len(),
        });
    }
    Message::from_parts(payload, MessageBody::PurgeAll)
}

/// Decode one framed message
///
/// # Errors
///
/// Returns an error if:
/// - The frame is short, mis-sized or of an unknown type
/// - The payload does not parse as its message type
pub fn decode(bytes: Bytes) -> Result<Message> {
    let (header, payload) = unframe(bytes)?;

    match header.message_type() {
        MessageType::Open => decode_open(payload),
        MessageType::OpenResp => decode_open_resp(payload),
        MessageType::Update => decode_update(payload),
        MessageType::Error => decode_error(payload),
        MessageType::PurgeAll => decode_purge_all(payload),
    }
}
