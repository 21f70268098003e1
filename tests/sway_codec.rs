//! Tests for header encoding/decoding and the Frame type.

use swaysock::sway::codec::{HEADER_LEN, Header, MAGIC, decode_header, encode_header};
use swaysock::sway::{Frame, ProtocolError, message};

#[test]
fn header_is_fourteen_bytes() {
    assert_eq!(HEADER_LEN, 14);
    assert_eq!(MAGIC, b"i3-ipc");
}

#[test]
fn encode_layout_is_magic_then_little_endian_fields() {
    let buf = encode_header(0x0102_0304, 0x8000_0003);
    assert_eq!(&buf[..6], b"i3-ipc");
    assert_eq!(&buf[6..10], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&buf[10..], &[0x03, 0x00, 0x00, 0x80]);
}

#[test]
fn decode_inverts_encode_at_field_boundaries() {
    let cases = [
        (0, 0),
        (18, message::command::GET_WORKSPACES),
        (u32::MAX, message::event::INPUT),
        (0x0000_0100, u32::MAX),
    ];
    for (payload_len, message_type) in cases {
        let header = decode_header(&encode_header(payload_len, message_type)).unwrap();
        assert_eq!(
            header,
            Header {
                payload_len,
                message_type
            }
        );
    }
}

#[test]
fn header_encode_method_matches_free_function() {
    let header = Header {
        payload_len: 7,
        message_type: 2,
    };
    assert_eq!(header.encode(), encode_header(7, 2));
}

#[test]
fn bad_magic_is_rejected_whatever_follows() {
    let mut buf = encode_header(5, 1);
    buf[0] = b'x';
    assert_eq!(
        decode_header(&buf),
        Err(ProtocolError::BadMagic {
            found: *b"x3-ipc"
        })
    );

    // The teardown sentinel is exactly one header long and must not decode.
    let sentinel: [u8; HEADER_LEN] = *b"close-sway-ipc";
    assert!(matches!(
        decode_header(&sentinel),
        Err(ProtocolError::BadMagic { .. })
    ));

    let zeros = [0u8; HEADER_LEN];
    assert!(decode_header(&zeros).is_err());
}

#[test]
fn frame_payload_excludes_terminator() {
    let frame = Frame::new(1, b"[]".to_vec());
    assert_eq!(frame.message_type(), 1);
    assert_eq!(frame.payload(), b"[]");
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.as_c_str().to_bytes(), b"[]");
    assert_eq!(frame.payload_str().unwrap(), "[]");
    assert_eq!(frame.into_payload(), b"[]".to_vec());
}

#[test]
fn empty_frame() {
    let frame = Frame::new(message::event::SHUTDOWN, Vec::new());
    assert!(frame.is_empty());
    assert!(frame.is_event());
    assert_eq!(frame.payload(), b"");
    assert!(frame.as_c_str().is_empty());
}

#[test]
fn c_str_view_stops_at_embedded_nul() {
    let frame = Frame::new(0, b"ab\0cd".to_vec());
    assert_eq!(frame.len(), 5);
    assert_eq!(frame.as_c_str().to_bytes(), b"ab");
}

#[test]
fn non_utf8_payload_is_still_a_frame() {
    let frame = Frame::new(0, vec![0xff, 0xfe]);
    assert!(frame.payload_str().is_err());
    assert_eq!(frame.payload(), &[0xff, 0xfe]);
}

#[test]
fn message_tables() {
    assert!(!message::is_event(message::command::SUBSCRIBE));
    assert!(message::is_event(message::event::WORKSPACE));
    assert_eq!(message::command_from_name("GET_TREE"), Some(4));
    assert_eq!(message::command_from_name("get_seats"), Some(101));
    assert_eq!(message::command_from_name("nope"), None);
    assert_eq!(message::command_name(3), Some("get_outputs"));
    assert_eq!(message::event_name(0x8000_0014), Some("bar_state_update"));
    assert_eq!(message::event_name(0x8000_00ff), None);
    assert!(message::event_names().any(|n| n == "window"));
}
