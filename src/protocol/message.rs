//! Decoded SXP message

use bytes::Bytes;

use super::{ErrorBody, MappingRecordList, MessageHeader, MessageType, OpenBody, Result};

/// Kind-specific content of a decoded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Open request
    Open(OpenBody),
    /// Open response
    OpenResp(OpenBody),
    /// Binding updates
    Update(MappingRecordList),
    /// Error notification
    Error(ErrorBody),
    /// Purge every binding learned from the sender
    PurgeAll,
}

/// Decoded SXP message
///
/// Built once per decode call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message header
    header: MessageHeader,
    /// Raw message payload
    payload: Bytes,
    /// Decoded payload
    body: MessageBody,
}

impl Message {
    pub(crate) fn from_parts(payload: Bytes, body: MessageBody) -> Result<Self> {
        let msg_type = match &body {
            MessageBody::Open(_) => MessageType::Open,
            MessageBody::OpenResp(_) => MessageType::OpenResp,
            MessageBody::Update(_) => MessageType::Update,
            MessageBody::Error(_) => MessageType::Error,
            MessageBody::PurgeAll => MessageType::PurgeAll,
        };
        let header = MessageHeader::new(msg_type, payload.len())?;

        Ok(Self {
            header,
            payload,
            body,
        })
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.header.message_type()
    }

    /// Get declared length (header + payload)
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.header.length()
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Get raw payload
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Get decoded body
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Get the Open/OpenResp body, if this is a handshake message
    #[must_use]
    pub const fn open(&self) -> Option<&OpenBody> {
        match &self.body {
            MessageBody::Open(body) | MessageBody::OpenResp(body) => Some(body),
            _ => None,
        }
    }

    /// Get the mapping records, if this is an Update
    #[must_use]
    pub const fn records(&self) -> Option<&MappingRecordList> {
        match &self.body {
            MessageBody::Update(records) => Some(records),
            _ => None,
        }
    }

    /// Get the Error body, if this is an Error
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorBody> {
        match &self.body {
            MessageBody::Error(body) => Some(body),
            _ => None,
        }
    }

    /// Take ownership of the decoded body
    #[must_use]
    pub fn into_body(self) -> MessageBody {
        self.body
    }

    /// Decode message from bytes
    pub fn decode(bytes: impl Into<Bytes>) -> Result<Self> {
        super::decode(bytes.into())
    }
}
