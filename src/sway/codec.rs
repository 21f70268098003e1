//! Wire header encoding and the decoded [`Frame`] type.
//!
//! Every message on the socket is a fixed 14-byte header followed by the payload:
//!
//! ```text
//! ┌──────────────┬────────────────┬──────────────┐
//! │ Magic        │ Payload length │ Message type │
//! │ "i3-ipc"     │ uint32 LE      │ uint32 LE    │
//! │ 6 bytes      │ 4 bytes        │ 4 bytes      │
//! └──────────────┴────────────────┴──────────────┘
//! ```
//!
//! Nothing here performs I/O.

use super::error::ProtocolError;
use super::message;
use std::ffi::CStr;
use std::fmt;

/// Protocol magic at the start of every header.
pub const MAGIC: &[u8; 6] = b"i3-ipc";

/// Header size in bytes.
pub const HEADER_LEN: usize = MAGIC.len() + 4 + 4;

/// Default ceiling on a single payload (64 MiB).
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 64 * 1024 * 1024;

const LEN_OFFSET: usize = MAGIC.len();
const TYPE_OFFSET: usize = LEN_OFFSET + 4;

/// The two numeric fields of a decoded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Number of payload bytes following the header.
    pub payload_len: u32,
    /// Command or event tag.
    pub message_type: u32,
}

impl Header {
    /// Encodes this header. Same as [`encode_header`].
    #[must_use]
    pub fn encode(self) -> [u8; HEADER_LEN] {
        encode_header(self.payload_len, self.message_type)
    }

    /// Payload length as a buffer size.
    #[must_use]
    pub fn payload_len_usize(self) -> usize {
        usize::try_from(self.payload_len).unwrap_or(usize::MAX)
    }
}

/// Writes magic, payload length, and type into a header buffer.
#[must_use]
pub fn encode_header(payload_len: u32, message_type: u32) -> [u8; HEADER_LEN] {
    let mut buf = [0u8; HEADER_LEN];
    buf[..LEN_OFFSET].copy_from_slice(MAGIC);
    buf[LEN_OFFSET..TYPE_OFFSET].copy_from_slice(&payload_len.to_le_bytes());
    buf[TYPE_OFFSET..].copy_from_slice(&message_type.to_le_bytes());
    buf
}

/// Checks the magic and extracts payload length and type.
///
/// # Errors
/// Returns [`ProtocolError::BadMagic`] if the first six bytes are not [`MAGIC`].
/// The remaining bytes are not looked at in that case.
pub fn decode_header(buf: &[u8; HEADER_LEN]) -> Result<Header, ProtocolError> {
    if &buf[..LEN_OFFSET] != MAGIC {
        let mut found = [0u8; MAGIC.len()];
        found.copy_from_slice(&buf[..LEN_OFFSET]);
        return Err(ProtocolError::BadMagic { found });
    }

    let payload_len = u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]);
    let message_type = u32::from_le_bytes([buf[10], buf[11], buf[12], buf[13]]);

    Ok(Header {
        payload_len,
        message_type,
    })
}

/// One complete message: type tag plus payload.
///
/// The internal buffer always ends with a NUL byte that is not part of the
/// payload, so text consumers can borrow it as a C string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    message_type: u32,
    buf: Vec<u8>,
}

impl Frame {
    /// Builds a frame from a logical payload.
    #[must_use]
    pub fn new(message_type: u32, payload: impl Into<Vec<u8>>) -> Self {
        let mut buf = payload.into();
        buf.push(0);
        Self { message_type, buf }
    }

    /// Wraps a buffer whose last byte is already the terminator.
    pub(crate) fn from_terminated(message_type: u32, buf: Vec<u8>) -> Self {
        debug_assert_eq!(buf.last(), Some(&0));
        Self { message_type, buf }
    }

    /// Command or event tag from the header.
    #[must_use]
    pub const fn message_type(&self) -> u32 {
        self.message_type
    }

    /// Whether the type tag is in the event range.
    #[must_use]
    pub const fn is_event(&self) -> bool {
        message::is_event(self.message_type)
    }

    /// Payload bytes, excluding the terminator.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.buf.len() - 1]
    }

    /// Payload length as declared in the header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload as UTF-8 text.
    ///
    /// # Errors
    /// Returns the UTF-8 error if the payload is not valid text.
    pub fn payload_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.payload())
    }

    /// Payload as a C string. Stops at the first NUL if the payload contains one.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.buf).unwrap_or_default()
    }

    /// Consumes the frame and returns the payload bytes.
    #[must_use]
    pub fn into_payload(mut self) -> Vec<u8> {
        self.buf.pop();
        self.buf
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("message_type", &format_args!("{:#x}", self.message_type))
            .field("payload", &String::from_utf8_lossy(self.payload()))
            .finish()
    }
}
