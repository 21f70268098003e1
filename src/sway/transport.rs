//! Raw socket ownership and exact-length reads and writes.

use super::error::SwayError;
use crate::internal;
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use std::io::{self, Read, Write};
use std::net::Shutdown;
use std::os::fd::AsFd;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

/// Size of `sockaddr_un.sun_path`, including the terminating NUL.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const SUN_PATH_LEN: usize = 108;
/// Size of `sockaddr_un.sun_path`, including the terminating NUL.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub const SUN_PATH_LEN: usize = 104;

/// Stream socket operations the transport needs beyond `Read + Write`.
///
/// Implemented for [`UnixStream`]; tests provide in-memory versions.
pub trait RawSocket: Read + Write {
    /// Shuts down both directions so a blocked peer read returns.
    ///
    /// # Errors
    /// Returns the OS error from `shutdown(2)`.
    fn shutdown_both(&self) -> io::Result<()>;

    /// Waits until at least one byte (or EOF) is readable, up to `timeout`.
    ///
    /// Returns `Ok(false)` if the wait expired with nothing to read. Must not
    /// consume any bytes.
    ///
    /// # Errors
    /// Returns any OS error from the wait other than an interrupt.
    fn wait_readable(&self, timeout: Duration) -> io::Result<bool>;

    /// Second handle to the same socket, usable while another thread is
    /// blocked on this one.
    ///
    /// # Errors
    /// Returns the OS error from `dup(2)`, or `Unsupported` by default.
    fn try_clone_handle(&self) -> io::Result<Self>
    where
        Self: Sized,
    {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}

impl RawSocket for UnixStream {
    fn shutdown_both(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }

    fn wait_readable(&self, timeout: Duration) -> io::Result<bool> {
        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let timeout = PollTimeout::try_from(millis).unwrap_or(PollTimeout::MAX);
        let mut fds = [PollFd::new(self.as_fd(), PollFlags::POLLIN)];
        match poll(&mut fds, timeout) {
            Ok(0) | Err(Errno::EINTR) => Ok(false),
            Ok(_) => {
                // Hangup and errors count as readable so the next read reports them.
                let ready = PollFlags::POLLIN
                    | PollFlags::POLLHUP
                    | PollFlags::POLLERR
                    | PollFlags::POLLNVAL;
                Ok(fds[0].revents().is_some_and(|revents| revents.intersects(ready)))
            }
            Err(errno) => Err(errno.into()),
        }
    }

    fn try_clone_handle(&self) -> io::Result<Self> {
        self.try_clone()
    }
}

/// Owns one connected stream socket.
///
/// The descriptor is released exactly once: by [`close`](Self::close), or when
/// the transport is dropped.
#[derive(Debug)]
pub struct SocketTransport<S: RawSocket = UnixStream> {
    socket: Option<S>,
}

impl SocketTransport<UnixStream> {
    /// Connects a stream socket to `path`.
    ///
    /// # Errors
    /// Returns [`SwayError::Connect`] if the path does not fit in a socket
    /// address or if `connect(2)` fails.
    pub fn connect(path: &Path) -> Result<Self, SwayError> {
        let path_len = path.as_os_str().len();
        if path_len >= SUN_PATH_LEN {
            return Err(SwayError::Connect {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "socket path is {path_len} bytes, limit is {}",
                        SUN_PATH_LEN - 1
                    ),
                ),
            });
        }

        let stream = UnixStream::connect(path).map_err(|source| SwayError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        internal::debug("SOCKET", &format!("Connected to {}", path.display()));
        Ok(Self::from_socket(stream))
    }
}

impl<S: RawSocket> SocketTransport<S> {
    /// Wraps an already-connected socket.
    pub const fn from_socket(socket: S) -> Self {
        Self {
            socket: Some(socket),
        }
    }

    /// Whether the descriptor is still held.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    /// Borrows the underlying socket, if still open.
    #[must_use]
    pub const fn get_ref(&self) -> Option<&S> {
        self.socket.as_ref()
    }

    fn socket_mut(&mut self) -> Result<&mut S, SwayError> {
        self.socket.as_mut().ok_or(SwayError::ConnectionClosed)
    }

    /// Writes every byte of `bytes`, retrying short writes.
    ///
    /// # Errors
    /// Returns [`SwayError::Write`] on an unrecoverable send error, or
    /// [`SwayError::ConnectionClosed`] if the transport was closed.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), SwayError> {
        let socket = self.socket_mut()?;
        let mut written = 0;
        while written < bytes.len() {
            match socket.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(SwayError::Write(io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("socket accepted {written} of {} bytes", bytes.len()),
                    )));
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SwayError::Write(e)),
            }
        }
        Ok(())
    }

    /// Fills `buf` completely, retrying short reads.
    ///
    /// # Errors
    /// Returns [`SwayError::Read`] if a receive fails or the peer closes the
    /// socket before `buf.len()` bytes arrived.
    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), SwayError> {
        let socket = self.socket_mut()?;
        let mut filled = 0;
        while filled < buf.len() {
            match socket.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(SwayError::Read(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("peer closed after {filled} of {} bytes", buf.len()),
                    )));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SwayError::Read(e)),
            }
        }
        Ok(())
    }

    /// Reads exactly `n` bytes.
    ///
    /// # Errors
    /// Same as [`read_exact_into`](Self::read_exact_into).
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, SwayError> {
        let mut buf = vec![0u8; n];
        self.read_exact_into(&mut buf)?;
        Ok(buf)
    }

    /// Waits up to `timeout` for readable data without consuming any.
    ///
    /// # Errors
    /// Returns [`SwayError::Read`] if the wait itself fails.
    pub fn wait_readable(&self, timeout: Duration) -> Result<bool, SwayError> {
        self.socket
            .as_ref()
            .ok_or(SwayError::ConnectionClosed)?
            .wait_readable(timeout)
            .map_err(SwayError::Read)
    }

    /// Shuts down both directions of the socket, keeping the descriptor.
    ///
    /// Best-effort; a socket the peer already dropped reports an error that is ignored.
    pub fn shutdown(&self) {
        if let Some(socket) = &self.socket {
            if let Err(e) = socket.shutdown_both() {
                internal::trace("SOCKET", &format!("shutdown failed: {e}"));
            }
        }
    }

    /// Releases the descriptor. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.socket.take().is_some() {
            internal::trace("SOCKET", "Socket closed");
        }
    }
}
