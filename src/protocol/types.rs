//! SXP message types, versions, connection modes and error codes

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Legacy SXP message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum MessageType {
    /// Connection open request
    Open = 1,
    /// Response to Open
    OpenResp = 2,
    /// Binding add/delete records
    Update = 3,
    /// Error notification
    Error = 4,
    /// Drop every binding learned from the sender
    PurgeAll = 5,
}

impl MessageType {
    /// Convert from wire code
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Open),
            2 => Some(Self::OpenResp),
            3 => Some(Self::Update),
            4 => Some(Self::Error),
            5 => Some(Self::PurgeAll),
            _ => None,
        }
    }

    /// Convert to wire code
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "Open",
            Self::OpenResp => "OpenResp",
            Self::Update => "Update",
            Self::Error => "Error",
            Self::PurgeAll => "PurgeAll",
        };
        write!(f, "{name}")
    }
}

/// SXP protocol version
///
/// Versions 1 to 3 use the legacy wire format handled by this crate. Version 4
/// is recognised so that it can be reported, but it is not legacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum Version {
    /// SXP version 1 (IPv4 host bindings)
    V1 = 1,
    /// SXP version 2 (adds IPv6 host bindings)
    V2 = 2,
    /// SXP version 3 (adds subnet bindings)
    V3 = 3,
    /// SXP version 4 (extended format)
    V4 = 4,
}

impl Version {
    /// Convert from wire code
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            _ => None,
        }
    }

    /// Convert to wire code
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Check if this version uses the legacy wire format
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::V1 | Self::V2 | Self::V3)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u32())
    }
}

/// Role a peer announces in Open/OpenResp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConnectionMode {
    /// Sends bindings
    Speaker,
    /// Receives bindings
    Listener,
    /// Sends and receives
    Both,
    /// Any other code, carried through untouched
    Other(u32),
}

impl ConnectionMode {
    /// Convert to wire code
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Speaker => 1,
            Self::Listener => 2,
            Self::Both => 3,
            Self::Other(code) => code,
        }
    }
}

impl From<u32> for ConnectionMode {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::Speaker,
            2 => Self::Listener,
            3 => Self::Both,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speaker => write!(f, "Speaker"),
            Self::Listener => write!(f, "Listener"),
            Self::Both => write!(f, "Both"),
            Self::Other(code) => write!(f, "Other({code})"),
        }
    }
}

/// Legacy (non-extended) error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ErrorCode {
    /// No error
    NoError = 0,
    /// Peer versions cannot be reconciled
    VersionMismatch = 1,
    /// Received message could not be parsed
    MessageParseError = 2,
}

impl ErrorCode {
    /// Convert from wire code
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoError),
            1 => Some(Self::VersionMismatch),
            2 => Some(Self::MessageParseError),
            _ => None,
        }
    }

    /// Convert to wire code
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoError => "NoError",
            Self::VersionMismatch => "VersionMismatch",
            Self::MessageParseError => "MessageParseError",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_codes() {
        let types = [
            MessageType::Open,
            MessageType::OpenResp,
            MessageType::Update,
            MessageType::Error,
            MessageType::PurgeAll,
        ];

        for msg_type in types {
            assert_eq!(MessageType::from_u32(msg_type.as_u32()), Some(msg_type));
        }
        assert_eq!(MessageType::from_u32(0), None);
        assert_eq!(MessageType::from_u32(6), None);
    }

    #[test]
    fn test_legacy_versions() {
        assert!(Version::V1.is_legacy());
        assert!(Version::V2.is_legacy());
        assert!(Version::V3.is_legacy());
        assert!(!Version::V4.is_legacy());
        assert_eq!(Version::from_u32(0), None);
        assert_eq!(Version::from_u32(5), None);
    }

    #[test]
    fn test_connection_mode_keeps_unknown_codes() {
        assert_eq!(ConnectionMode::from(2), ConnectionMode::Listener);
        assert_eq!(ConnectionMode::from(77).as_u32(), 77);
    }
}
