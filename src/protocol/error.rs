//! SXP codec error types

use std::net::IpAddr;

use thiserror::Error;

use super::{ErrorCode, Version};

/// Legacy SXP codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error message data exceeds the protocol limit
    #[error("error data too long: {len} bytes (max {max})")]
    ErrorDataTooLong {
        /// Supplied data length
        len: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Payload too large for the 32-bit length field
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Declared message length does not match the bytes supplied
    #[error("message length mismatch: header declares {declared} bytes, got {actual}")]
    LengthMismatch {
        /// Length carried in the header
        declared: u32,
        /// Length of the buffer
        actual: usize,
    },

    /// Invalid message type
    #[error("invalid message type: {type_code:#x}")]
    InvalidMessageType {
        /// Invalid type code
        type_code: u32,
    },

    /// Fixed-width body followed by extra bytes
    #[error("{extra} unexpected trailing bytes after {context} body")]
    TrailingData {
        /// Body being decoded
        context: &'static str,
        /// Number of extra bytes
        extra: usize,
    },

    /// Version code outside the known range
    #[error("unknown version: {version}")]
    UnknownVersion {
        /// Raw version code
        version: u32,
    },

    /// Update requested for a version with no legacy encoding rules
    #[error("no legacy update encoding for {version}")]
    UnsupportedTarget {
        /// Requested target version
        version: Version,
    },

    /// Peer answered with a version this codec cannot speak
    #[error("incompatible peer version {version} ({code})")]
    IncompatiblePeerVersion {
        /// Error code to send back to the peer
        code: ErrorCode,
        /// Raw version code received
        version: u32,
    },

    /// Mapping record or TLV runs past the end of its buffer
    #[error("mapping record truncated: need {needed} bytes, got {got}")]
    RecordTruncated {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Unknown mapping record opcode
    #[error("unknown mapping record opcode: {opcode}")]
    UnknownOpcode {
        /// Raw opcode
        opcode: u32,
    },

    /// Record too short to hold the address for its family
    #[error("address length mismatch: expected {expected} bytes, record holds {found}")]
    AddressLength {
        /// Address width for the opcode's family
        expected: usize,
        /// Bytes available for the address
        found: usize,
    },

    /// TLV length does not match the fixed width of its type
    #[error("attribute {type_code} length mismatch: expected {expected}, got {found}")]
    AttributeLength {
        /// TLV type code
        type_code: u32,
        /// Fixed width for the type
        expected: usize,
        /// Declared length
        found: usize,
    },

    /// Address and prefix length do not form a valid prefix
    #[error("unknown prefix: {address}/{prefix_len}")]
    UnknownPrefix {
        /// Decoded address
        address: IpAddr,
        /// Decoded prefix length
        prefix_len: u8,
    },

    /// Mandatory attribute missing from a mapping record
    #[error("mapping record is missing mandatory attribute {type_code}")]
    MissingAttribute {
        /// TLV type code that was expected
        type_code: u32,
    },
}

impl Error {
    /// Check if the error means the outer frame is unusable
    #[must_use]
    pub const fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::BufferTooSmall { .. }
                | Self::LengthMismatch { .. }
                | Self::InvalidMessageType { .. }
                | Self::TrailingData { .. }
        )
    }

    /// Error code a peer should be answered with, if the error came off the wire
    ///
    /// Caller-side defects (oversized input, unsupported target version) have
    /// no protocol answer.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::ErrorDataTooLong { .. }
            | Self::PayloadTooLarge { .. }
            | Self::UnsupportedTarget { .. } => None,
            Self::IncompatiblePeerVersion { code, .. } => Some(*code),
            Self::UnknownVersion { .. } => Some(ErrorCode::VersionMismatch),
            _ => Some(ErrorCode::MessageParseError),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_classification() {
        assert!(Error::BufferTooSmall { needed: 8, got: 2 }.is_framing());
        assert!(Error::LengthMismatch { declared: 9, actual: 8 }.is_framing());
        assert!(!Error::UnknownOpcode { opcode: 9 }.is_framing());
    }

    #[test]
    fn test_error_code_mapping() {
        let err = Error::IncompatiblePeerVersion {
            code: ErrorCode::VersionMismatch,
            version: 4,
        };
        assert_eq!(err.error_code(), Some(ErrorCode::VersionMismatch));

        let err = Error::AttributeLength {
            type_code: 1,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.error_code(), Some(ErrorCode::MessageParseError));

        let err = Error::UnknownVersion { version: 9 };
        assert_eq!(err.error_code(), Some(ErrorCode::VersionMismatch));
    }

    #[test]
    fn test_caller_defects_have_no_error_code() {
        let err = Error::ErrorDataTooLong { len: 11, max: 10 };
        assert_eq!(err.error_code(), None);

        let err = Error::UnsupportedTarget {
            version: Version::V4,
        };
        assert_eq!(err.error_code(), None);
        assert_eq!(err.to_string(), "no legacy update encoding for v4");

        let err = Error::PayloadTooLarge {
            size: usize::MAX,
            max: 10,
        };
        assert_eq!(err.error_code(), None);
        assert!(!err.is_framing());
    }
}
