//! Mapping record TLV attributes
//!
//! ```text
//! TLV = [Type (4 octets), Length (4 octets), Value (Length octets)]
//! ```
//!
//! Two types are defined for the legacy format: the mandatory SGT attribute
//! (type 1, 2-byte value) and the optional Prefix-Length attribute (type 2,
//! 1-byte value). A record without Prefix-Length carries a host address.

use bytes::{Buf, BufMut, Bytes};

use super::{Error, Result, Sgt, TLV_HEADER_SIZE};

/// Known TLV type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttributeType {
    /// Security group tag
    Sgt = 1,
    /// Prefix length of the record's address
    PrefixLength = 2,
}

impl AttributeType {
    /// Convert from wire code
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Sgt),
            2 => Some(Self::PrefixLength),
            _ => None,
        }
    }

    /// Convert to wire code
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Fixed value width for this type
    #[must_use]
    pub const fn value_len(self) -> usize {
        match self {
            Self::Sgt => 2,
            Self::PrefixLength => 1,
        }
    }
}

/// A decoded TLV attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Security group tag
    Sgt(Sgt),
    /// Prefix length of the record's address
    PrefixLength(u8),
    /// Unrecognised type, skipped over and kept verbatim
    Unknown {
        /// Raw type code
        type_code: u32,
        /// Raw value
        value: Bytes,
    },
}

impl Attribute {
    /// Get wire type code
    #[must_use]
    pub fn type_code(&self) -> u32 {
        match self {
            Self::Sgt(_) => AttributeType::Sgt.as_u32(),
            Self::PrefixLength(_) => AttributeType::PrefixLength.as_u32(),
            Self::Unknown { type_code, .. } => *type_code,
        }
    }

    /// Get value length in bytes
    #[must_use]
    pub fn value_len(&self) -> usize {
        match self {
            Self::Sgt(_) => AttributeType::Sgt.value_len(),
            Self::PrefixLength(_) => AttributeType::PrefixLength.value_len(),
            Self::Unknown { value, .. } => value.len(),
        }
    }

    /// Get encoded length (header + value)
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_SIZE + self.value_len()
    }

    /// Write the attribute to `buf`
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.type_code());
        // Value widths are 1, 2 or a slice taken from a u32-length TLV.
        buf.put_u32(self.value_len() as u32);
        match self {
            Self::Sgt(sgt) => buf.put_u16(sgt.value()),
            Self::PrefixLength(len) => buf.put_u8(*len),
            Self::Unknown { value, .. } => buf.put_slice(value),
        }
    }

    /// Decode one attribute from the front of `buf`, advancing past it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TLV header or value runs past the end of `buf`
    /// - A known type declares a length other than its fixed width
    pub fn decode(buf: &mut Bytes) -> Result<Self> {
        if buf.remaining() < TLV_HEADER_SIZE {
            return Err(Error::RecordTruncated {
                needed: TLV_HEADER_SIZE,
                got: buf.remaining(),
            });
        }

        let type_code = buf.get_u32();
        let declared = buf.get_u32() as usize;

        if let Some(kind) = AttributeType::from_u32(type_code) {
            if declared != kind.value_len() {
                return Err(Error::AttributeLength {
                    type_code,
                    expected: kind.value_len(),
                    found: declared,
                });
            }
        }

        if buf.remaining() < declared {
            return Err(Error::RecordTruncated {
                needed: declared,
                got: buf.remaining(),
            });
        }

        let attribute = match AttributeType::from_u32(type_code) {
            Some(AttributeType::Sgt) => Self::Sgt(Sgt(buf.get_u16())),
            Some(AttributeType::PrefixLength) => Self::PrefixLength(buf.get_u8()),
            None => Self::Unknown {
                type_code,
                value: buf.split_to(declared),
            },
        };

        Ok(attribute)
    }
}
