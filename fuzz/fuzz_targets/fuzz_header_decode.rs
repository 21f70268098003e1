#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::{self, Read, Write};
use std::time::Duration;
use swaysock::sway::codec::{HEADER_LEN, decode_header};
use swaysock::sway::{Connection, RawSocket, SocketTransport};

struct Input<'a>(&'a [u8]);

impl Read for Input<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for Input<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RawSocket for Input<'_> {
    fn shutdown_both(&self) -> io::Result<()> {
        Ok(())
    }

    fn wait_readable(&self, _timeout: Duration) -> io::Result<bool> {
        Ok(true)
    }
}

fuzz_target!(|data: &[u8]| {
    // Must not panic on any input
    if let Ok(header) = <&[u8; HEADER_LEN]>::try_from(data.get(..HEADER_LEN).unwrap_or_default()) {
        let _ = decode_header(header);
    }

    // Small cap so hostile lengths are rejected instead of allocated
    let mut conn = Connection::new(SocketTransport::from_socket(Input(data)))
        .with_max_payload_len(1 << 16);
    while conn.receive().is_ok() {}
    assert!(!conn.is_open());
});
