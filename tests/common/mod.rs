//! Shared helpers for the sway IPC integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;
use std::time::Duration;
use swaysock::sway::codec::{HEADER_LEN, decode_header, encode_header};
use swaysock::sway::RawSocket;

/// Encodes a complete frame.
pub fn frame_bytes(message_type: u32, payload: &[u8]) -> Vec<u8> {
    let len = u32::try_from(payload.len()).expect("payload fits u32");
    let mut buf = encode_header(len, message_type).to_vec();
    buf.extend_from_slice(payload);
    buf
}

/// Reads one request frame from a peer stream.
pub fn read_request(stream: &mut impl Read) -> (u32, Vec<u8>) {
    let mut header = [0u8; HEADER_LEN];
    stream.read_exact(&mut header).expect("read request header");
    let header = decode_header(&header).expect("request header");
    let mut payload = vec![0u8; header.payload_len_usize()];
    stream.read_exact(&mut payload).expect("read request payload");
    (header.message_type, payload)
}

/// In-memory socket that hands out at most `read_chunk` bytes per read and
/// accepts at most `write_chunk` bytes per write. Reads return EOF once the
/// scripted input is exhausted.
pub struct ChunkedSocket {
    input: Vec<u8>,
    pos: usize,
    read_chunk: usize,
    write_chunk: usize,
    interrupts: usize,
    pub written: Rc<RefCell<Vec<u8>>>,
    pub shutdowns: Rc<RefCell<usize>>,
}

impl ChunkedSocket {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input,
            pos: 0,
            read_chunk: usize::MAX,
            write_chunk: usize::MAX,
            interrupts: 0,
            written: Rc::new(RefCell::new(Vec::new())),
            shutdowns: Rc::new(RefCell::new(0)),
        }
    }

    pub const fn read_chunk(mut self, n: usize) -> Self {
        self.read_chunk = n;
        self
    }

    pub const fn write_chunk(mut self, n: usize) -> Self {
        self.write_chunk = n;
        self
    }

    /// Fails the next `n` reads and writes with `Interrupted`.
    pub const fn interrupts(mut self, n: usize) -> Self {
        self.interrupts = n;
        self
    }

    fn take_interrupt(&mut self) -> io::Result<()> {
        if self.interrupts > 0 {
            self.interrupts -= 1;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        Ok(())
    }
}

impl Read for ChunkedSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.take_interrupt()?;
        let remaining = self.input.len() - self.pos;
        let n = remaining.min(buf.len()).min(self.read_chunk);
        buf[..n].copy_from_slice(&self.input[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for ChunkedSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.take_interrupt()?;
        let n = buf.len().min(self.write_chunk);
        self.written.borrow_mut().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RawSocket for ChunkedSocket {
    fn shutdown_both(&self) -> io::Result<()> {
        *self.shutdowns.borrow_mut() += 1;
        Ok(())
    }

    fn wait_readable(&self, _timeout: Duration) -> io::Result<bool> {
        // EOF counts as readable, matching a real socket.
        Ok(true)
    }

    /// Shares the write log and shutdown counter; reads see EOF.
    fn try_clone_handle(&self) -> io::Result<Self> {
        Ok(Self {
            input: Vec::new(),
            pos: 0,
            read_chunk: self.read_chunk,
            write_chunk: usize::MAX,
            interrupts: 0,
            written: Rc::clone(&self.written),
            shutdowns: Rc::clone(&self.shutdowns),
        })
    }
}

/// Socket whose reads and writes always fail with `kind`. Has no duplicate
/// handle, so a client built on it tears down through the connection locks.
pub struct BrokenSocket(pub io::ErrorKind);

impl Read for BrokenSocket {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from(self.0))
    }
}

impl Write for BrokenSocket {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(self.0))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RawSocket for BrokenSocket {
    fn shutdown_both(&self) -> io::Result<()> {
        Ok(())
    }

    fn wait_readable(&self, _timeout: Duration) -> io::Result<bool> {
        Ok(true)
    }
}
