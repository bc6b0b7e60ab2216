//! SXP message header
//!
//! Every legacy message starts with the same 8-byte header.

use bytes::{BufMut, Bytes, BytesMut};

use super::{
    ERROR_BODY_SIZE, Error, HEADER_SIZE, MAX_ERROR_DATA_LEN, MAX_PAYLOAD_SIZE,
    MESSAGE_HEADER_LENGTH_LENGTH, MessageType, Result,
};

/// SXP message header (8 bytes)
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                     Message Length (4)                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Message Type (4)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The length covers the whole message, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    length: u32,
    msg_type: MessageType,
}

impl MessageHeader {
    /// Create a header for a payload of `payload_len` bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] if header and payload together do not
    /// fit the 32-bit length field.
    pub fn new(msg_type: MessageType, payload_len: usize) -> Result<Self> {
        if payload_len > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload_len,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            length: (HEADER_SIZE + payload_len) as u32,
            msg_type,
        })
    }

    /// Get declared message length
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.msg_type
    }

    /// Get payload length implied by the header
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        self.length as usize - HEADER_SIZE
    }

    /// Convert to bytes (big-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];

        bytes[..MESSAGE_HEADER_LENGTH_LENGTH].copy_from_slice(&self.length.to_be_bytes());
        bytes[MESSAGE_HEADER_LENGTH_LENGTH..]
            .copy_from_slice(&self.msg_type.as_u32().to_be_bytes());

        bytes
    }

    /// Parse from the start of `bytes` (big-endian)
    ///
    /// Only the header itself is validated; matching the declared length
    /// against the buffer is left to [`unframe`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let length = read_u32(&bytes[..MESSAGE_HEADER_LENGTH_LENGTH]);
        let type_code = read_u32(&bytes[MESSAGE_HEADER_LENGTH_LENGTH..HEADER_SIZE]);

        if (length as usize) < HEADER_SIZE {
            return Err(Error::LengthMismatch {
                declared: length,
                actual: bytes.len(),
            });
        }

        let msg_type =
            MessageType::from_u32(type_code).ok_or(Error::InvalidMessageType { type_code })?;

        Ok(Self { length, msg_type })
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    u32::from_be_bytes(raw)
}

/// Prepend the message header to `payload`
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if `payload` exceeds [`MAX_PAYLOAD_SIZE`].
pub fn frame(msg_type: MessageType, payload: &[u8]) -> Result<Bytes> {
    let header = MessageHeader::new(msg_type, payload.len())?;
    Ok(put_frame(header, payload))
}

/// Prepend the message header to an Open, OpenResp, Error or PurgeAll body
///
/// These bodies are bounded by the Error layout, far below [`MAX_PAYLOAD_SIZE`].
pub(crate) fn frame_control(msg_type: MessageType, body: &[u8]) -> Bytes {
    debug_assert!(body.len() <= ERROR_BODY_SIZE + MAX_ERROR_DATA_LEN);

    let header = MessageHeader {
        length: (HEADER_SIZE + body.len()) as u32,
        msg_type,
    };
    put_frame(header, body)
}

fn put_frame(header: MessageHeader, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.put_slice(&header.to_bytes());
    buf.put_slice(payload);
    buf.freeze()
}

/// Split a buffer holding exactly one message into header and payload
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is shorter than the header
/// - Declared length differs from the buffer length
/// - Message type is unknown
pub fn unframe(bytes: Bytes) -> Result<(MessageHeader, Bytes)> {
    let header = MessageHeader::from_bytes(&bytes)?;

    if header.length() as usize != bytes.len() {
        return Err(Error::LengthMismatch {
            declared: header.length(),
            actual: bytes.len(),
        });
    }

    let payload = bytes.slice(HEADER_SIZE..);
    Ok((header, payload))
}
