//! Open, OpenResp and Error message bodies
//!
//! Control bodies are fixed-width and carry no TLVs.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{
    ConnectionMode, ERROR_BODY_SIZE, Error, ErrorCode, MAX_ERROR_DATA_LEN, OPEN_BODY_SIZE, Result,
    Version,
};

/// Open/OpenResp body
///
/// ```text
/// [Version (4 octets), Mode (4 octets)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenBody {
    version: Version,
    mode: ConnectionMode,
}

impl OpenBody {
    /// Create a new body
    #[must_use]
    pub const fn new(version: Version, mode: ConnectionMode) -> Self {
        Self { version, mode }
    }

    /// Get proposed version
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Get connection mode
    #[must_use]
    pub const fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Convert to bytes (big-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; OPEN_BODY_SIZE] {
        let mut bytes = [0u8; OPEN_BODY_SIZE];
        bytes[0..4].copy_from_slice(&self.version.as_u32().to_be_bytes());
        bytes[4..8].copy_from_slice(&self.mode.as_u32().to_be_bytes());
        bytes
    }

    /// Parse an Open body
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not exactly 8 bytes or the version
    /// code is unknown.
    pub fn decode_open(payload: &[u8]) -> Result<Self> {
        let (version, mode) = split_open(payload)?;
        let version = Version::from_u32(version).ok_or(Error::UnknownVersion { version })?;
        Ok(Self::new(version, ConnectionMode::from(mode)))
    }

    /// Parse an OpenResp body
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not exactly 8 bytes, or
    /// [`Error::IncompatiblePeerVersion`] tagged with
    /// [`ErrorCode::VersionMismatch`] if the peer answered with anything but a
    /// legacy version.
    pub fn decode_open_resp(payload: &[u8]) -> Result<Self> {
        let (version, mode) = split_open(payload)?;
        let version = Version::from_u32(version)
            .filter(|version| version.is_legacy())
            .ok_or(Error::IncompatiblePeerVersion {
                code: ErrorCode::VersionMismatch,
                version,
            })?;
        Ok(Self::new(version, ConnectionMode::from(mode)))
    }
}

fn split_open(mut payload: &[u8]) -> Result<(u32, u32)> {
    if payload.len() < OPEN_BODY_SIZE {
        return Err(Error::BufferTooSmall {
            needed: OPEN_BODY_SIZE,
            got: payload.len(),
        });
    }
    if payload.len() > OPEN_BODY_SIZE {
        return Err(Error::TrailingData {
            context: "open",
            extra: payload.len() - OPEN_BODY_SIZE,
        });
    }

    Ok((payload.get_u32(), payload.get_u32()))
}

/// Error body
///
/// ```text
/// [0x00, 0x00, 0x00, Error Code (1 octet), Data (0..10 octets)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    code: u8,
    data: Bytes,
}

impl ErrorBody {
    /// Create a new body
    ///
    /// # Errors
    ///
    /// Returns [`Error::ErrorDataTooLong`] if `data` exceeds 10 bytes.
    pub fn new(code: ErrorCode, data: &[u8]) -> Result<Self> {
        if data.len() > MAX_ERROR_DATA_LEN {
            return Err(Error::ErrorDataTooLong {
                len: data.len(),
                max: MAX_ERROR_DATA_LEN,
            });
        }

        Ok(Self {
            code: code.as_u8(),
            data: Bytes::copy_from_slice(data),
        })
    }

    /// Get raw error code
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Get error code, if it is one this crate knows
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_u8(self.code)
    }

    /// Get variable data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get encoded length
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ERROR_BODY_SIZE + self.data.len()
    }

    /// Write the body to `buf`
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&[0, 0, 0, self.code]);
        buf.put_slice(&self.data);
    }

    /// Concatenate the body into a fresh buffer
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse an Error body
    ///
    /// The three leading reserved bytes are not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is shorter than 4 bytes or carries more
    /// than 10 bytes of data.
    pub fn decode(mut payload: Bytes) -> Result<Self> {
        if payload.len() < ERROR_BODY_SIZE {
            return Err(Error::BufferTooSmall {
                needed: ERROR_BODY_SIZE,
                got: payload.len(),
            });
        }
        let extra = payload.len() - ERROR_BODY_SIZE;
        if extra > MAX_ERROR_DATA_LEN {
            return Err(Error::TrailingData {
                context: "error",
                extra: extra - MAX_ERROR_DATA_LEN,
            });
        }

        payload.advance(3);
        let code = payload.get_u8();
        Ok(Self {
            code,
            data: payload,
        })
    }
}
