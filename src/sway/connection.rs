//! Framed request/response and event reads over one socket.

use super::codec::{self, DEFAULT_MAX_PAYLOAD_LEN, Frame, HEADER_LEN};
use super::error::{ProtocolError, SwayError};
use super::transport::{RawSocket, SocketTransport};
use crate::config::ConnectionConfig;
use crate::internal;
use crate::level::Level;
use std::io;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

/// One framed connection to the compositor.
///
/// There is no request id on the wire: the response to [`send`](Self::send)
/// is simply the next frame read. Only one request may be in flight.
///
/// Any fatal error closes the connection; later calls fail with
/// [`SwayError::ConnectionClosed`].
#[derive(Debug)]
pub struct Connection<S: RawSocket = UnixStream> {
    transport: SocketTransport<S>,
    max_payload_len: usize,
}

impl Connection<UnixStream> {
    /// Connects to the socket at `path`.
    ///
    /// # Errors
    /// Returns [`SwayError::Connect`] if the socket cannot be connected.
    pub fn open(path: &Path, config: &ConnectionConfig) -> Result<Self, SwayError> {
        let transport = SocketTransport::connect(path)?;
        Ok(Self::new(transport).with_max_payload_len(config.max_payload_len))
    }
}

impl<S: RawSocket> Connection<S> {
    /// Wraps a transport with the default payload limit.
    pub const fn new(transport: SocketTransport<S>) -> Self {
        Self {
            transport,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }

    /// Sets the largest payload accepted in either direction.
    #[must_use]
    pub const fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// Largest payload accepted in either direction.
    #[must_use]
    pub const fn max_payload_len(&self) -> usize {
        self.max_payload_len
    }

    /// Whether the connection can still be used.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Sends one request and returns the next frame as its response.
    ///
    /// # Errors
    /// Fails if the payload is over the limit, on any transport error, or if
    /// the response is malformed.
    pub fn send(&mut self, message_type: u32, payload: &[u8]) -> Result<Frame, SwayError> {
        self.write_frame(message_type, payload)?;
        self.receive()
    }

    /// Writes one frame without waiting for a reply.
    ///
    /// An oversized payload is rejected before anything is written and leaves
    /// the connection open.
    ///
    /// # Errors
    /// Returns [`SwayError::Protocol`] for an oversized payload and
    /// [`SwayError::Write`] if the socket write fails.
    pub fn write_frame(&mut self, message_type: u32, payload: &[u8]) -> Result<(), SwayError> {
        if !self.is_open() {
            return Err(SwayError::ConnectionClosed);
        }

        let too_large = ProtocolError::PayloadTooLarge {
            len: payload.len(),
            max: self.max_payload_len,
        };
        if payload.len() > self.max_payload_len {
            return Err(too_large.into());
        }
        let payload_len = u32::try_from(payload.len()).map_err(|_| too_large)?;

        if internal::enabled(Level::Trace) {
            internal::trace(
                "IPC",
                &format!("-> type={message_type:#x} len={payload_len}"),
            );
        }

        let header = codec::encode_header(payload_len, message_type);
        let result = self
            .transport
            .write_all(&header)
            .and_then(|()| self.transport.write_all(payload));
        self.fail_on_error(result)
    }

    /// Reads one complete frame.
    ///
    /// Either the whole frame is returned or the connection is closed; a
    /// partial frame is never handed out.
    ///
    /// # Errors
    /// Returns [`SwayError::Read`] on a transport error or early EOF, and
    /// [`SwayError::Protocol`] on bad magic or an oversized length.
    pub fn receive(&mut self) -> Result<Frame, SwayError> {
        let result = self.read_frame();
        self.fail_on_error(result)
    }

    /// Like [`receive`](Self::receive), but gives up if nothing arrives within
    /// `timeout`.
    ///
    /// Returns `Ok(None)` on timeout. Once a frame has started to arrive it is
    /// read to completion.
    ///
    /// # Errors
    /// Same as [`receive`](Self::receive).
    pub fn receive_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>, SwayError> {
        let ready = self.transport.wait_readable(timeout);
        if self.fail_on_error(ready)? {
            self.receive().map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_frame(&mut self) -> Result<Frame, SwayError> {
        let mut header_buf = [0u8; HEADER_LEN];
        self.transport.read_exact_into(&mut header_buf)?;
        let header = codec::decode_header(&header_buf)?;

        let len = header.payload_len_usize();
        if len > self.max_payload_len {
            return Err(ProtocolError::PayloadTooLarge {
                len,
                max: self.max_payload_len,
            }
            .into());
        }

        // One extra byte holds the terminator.
        let mut buf = vec![0u8; len + 1];
        self.transport.read_exact_into(&mut buf[..len])?;

        if internal::enabled(Level::Trace) {
            internal::trace(
                "IPC",
                &format!("<- type={:#x} len={len}", header.message_type),
            );
        }

        Ok(Frame::from_terminated(header.message_type, buf))
    }

    /// Writes bytes that are not a frame. Used for the teardown sentinel.
    pub(crate) fn write_raw(&mut self, bytes: &[u8]) -> Result<(), SwayError> {
        self.transport.write_all(bytes)
    }

    /// Shuts down both directions of the socket so blocked reads on either
    /// side return.
    pub fn shutdown(&self) {
        self.transport.shutdown();
    }

    /// Duplicates the socket handle, if still open.
    pub(crate) fn try_clone_handle(&self) -> Option<io::Result<S>> {
        self.transport
            .get_ref()
            .map(|socket| socket.try_clone_handle())
    }

    /// Releases the socket. Idempotent.
    pub fn close(&mut self) {
        self.transport.close();
    }

    fn fail_on_error<T>(&mut self, result: Result<T, SwayError>) -> Result<T, SwayError> {
        if let Err(ref e) = result {
            if e.is_fatal() && self.is_open() {
                internal::warn("IPC", &format!("Closing connection: {e}"));
                self.shutdown();
                self.close();
            }
        }
        result
    }
}
