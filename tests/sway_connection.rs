//! Tests for framed send/receive on a single connection.

mod common;

use common::{ChunkedSocket, frame_bytes};
use std::io::{self, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;
use swaysock::sway::codec::encode_header;
use swaysock::sway::{Connection, Frame, ProtocolError, SocketTransport, SwayError};

fn connection(input: Vec<u8>) -> Connection<ChunkedSocket> {
    Connection::new(SocketTransport::from_socket(ChunkedSocket::new(input)))
}

#[test]
fn receive_assembles_frame_from_one_byte_reads() {
    let payload = br#"[{"num":1,"name":"1"}]"#;
    let socket = ChunkedSocket::new(frame_bytes(1, payload)).read_chunk(1);
    let mut conn = Connection::new(SocketTransport::from_socket(socket));

    let frame = conn.receive().unwrap();
    assert_eq!(frame, Frame::new(1, payload.to_vec()));
    assert!(conn.is_open());
}

#[test]
fn receive_yields_back_to_back_frames_in_order() {
    let mut input = frame_bytes(0x8000_0000, b"first");
    input.extend(frame_bytes(0x8000_0003, b"second"));
    input.extend(frame_bytes(0x8000_0007, b""));
    let mut conn = connection(input);

    assert_eq!(conn.receive().unwrap().payload(), b"first");
    assert_eq!(conn.receive().unwrap().payload(), b"second");
    let tick = conn.receive().unwrap();
    assert_eq!(tick.message_type(), 0x8000_0007);
    assert!(tick.is_empty());
}

#[test]
fn eof_mid_payload_is_read_error_and_closes() {
    let mut input = encode_header(10, 1).to_vec();
    input.extend_from_slice(b"abcd");
    let mut conn = connection(input);

    match conn.receive() {
        Err(SwayError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("expected read error, got {other:?}"),
    }
    assert!(!conn.is_open());
    assert!(matches!(conn.receive(), Err(SwayError::ConnectionClosed)));
}

#[test]
fn eof_mid_header_is_read_error() {
    let mut conn = connection(b"i3-ip".to_vec());
    assert!(matches!(conn.receive(), Err(SwayError::Read(_))));
}

#[test]
fn bad_magic_invalidates_connection() {
    let mut input = b"XXXXXX".to_vec();
    input.extend_from_slice(&[0; 8]);
    input.extend(frame_bytes(1, b"valid"));
    let mut conn = connection(input);

    assert!(matches!(
        conn.receive(),
        Err(SwayError::Protocol(ProtocolError::BadMagic { .. }))
    ));
    assert!(!conn.is_open());
    // The valid frame behind the garbage is never reached.
    assert!(matches!(conn.receive(), Err(SwayError::ConnectionClosed)));
}

#[test]
fn oversized_incoming_length_fails_without_allocating() {
    let input = encode_header(u32::MAX, 4).to_vec();
    let mut conn = connection(input).with_max_payload_len(1024);

    match conn.receive() {
        Err(SwayError::Protocol(ProtocolError::PayloadTooLarge { len, max })) => {
            assert_eq!(max, 1024);
            assert!(len > max);
        }
        other => panic!("expected payload too large, got {other:?}"),
    }
    assert!(!conn.is_open());
}

#[test]
fn oversized_outgoing_payload_is_rejected_before_writing() {
    let socket = ChunkedSocket::new(Vec::new());
    let written = socket.written.clone();
    let mut conn = Connection::new(SocketTransport::from_socket(socket)).with_max_payload_len(4);

    assert!(matches!(
        conn.write_frame(0, b"too long"),
        Err(SwayError::Protocol(ProtocolError::PayloadTooLarge { len: 8, max: 4 }))
    ));
    assert!(written.borrow().is_empty());
    assert!(conn.is_open());
}

#[test]
fn send_writes_header_then_payload_and_returns_next_frame() {
    let socket = ChunkedSocket::new(frame_bytes(0, br#"[{"success":true}]"#)).write_chunk(5);
    let written = socket.written.clone();
    let mut conn = Connection::new(SocketTransport::from_socket(socket));

    let reply = conn.send(0, b"workspace 2").unwrap();
    assert_eq!(&*written.borrow(), &frame_bytes(0, b"workspace 2"));
    assert_eq!(reply.message_type(), 0);
    assert_eq!(reply.payload(), br#"[{"success":true}]"#);
}

#[test]
fn closed_connection_refuses_send() {
    let mut conn = connection(frame_bytes(0, b"unused"));
    conn.close();
    conn.close();
    assert!(matches!(conn.send(0, b""), Err(SwayError::ConnectionClosed)));
}

#[test]
fn receive_timeout_returns_none_when_idle_then_the_frame() {
    let (ours, mut peer) = UnixStream::pair().unwrap();
    let mut conn = Connection::new(SocketTransport::from_socket(ours));

    assert!(conn.receive_timeout(Duration::from_millis(20)).unwrap().is_none());
    assert!(conn.is_open());

    peer.write_all(&frame_bytes(0x8000_0000, br#"{"change":"focus"}"#))
        .unwrap();
    let frame = conn
        .receive_timeout(Duration::from_secs(2))
        .unwrap()
        .expect("frame after data arrived");
    assert_eq!(frame.payload(), br#"{"change":"focus"}"#);

    // The socket is back in blocking mode after the wait.
    peer.write_all(&frame_bytes(1, b"[]")).unwrap();
    assert_eq!(conn.receive().unwrap().payload(), b"[]");
}

#[test]
fn receive_timeout_reads_whole_frame_even_if_it_arrives_in_pieces() {
    let (ours, mut peer) = UnixStream::pair().unwrap();
    let mut conn = Connection::new(SocketTransport::from_socket(ours));

    let bytes = frame_bytes(7, b"{\"human_readable\":\"1.9\"}");
    let writer = std::thread::spawn(move || {
        for chunk in bytes.chunks(3) {
            peer.write_all(chunk).unwrap();
            std::thread::sleep(Duration::from_millis(2));
        }
        peer
    });

    let frame = conn
        .receive_timeout(Duration::from_secs(2))
        .unwrap()
        .expect("frame");
    assert_eq!(frame.message_type(), 7);
    assert_eq!(frame.payload(), b"{\"human_readable\":\"1.9\"}");
    drop(writer.join().unwrap());
}

#[test]
fn receive_timeout_reports_peer_close() {
    let (ours, peer) = UnixStream::pair().unwrap();
    let mut conn = Connection::new(SocketTransport::from_socket(ours));
    drop(peer);

    assert!(matches!(
        conn.receive_timeout(Duration::from_secs(1)),
        Err(SwayError::Read(_))
    ));
    assert!(!conn.is_open());
}
