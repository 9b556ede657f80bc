//! Tests for frame encoding and decoding, including malformed input.

use rstest::rstest;

use super::{Frame, RequestFrame, ResponseFrame, WireError};
use crate::request_id::RequestId;

fn request(id: &str, message: &str) -> Frame {
    Frame::Request(RequestFrame {
        request_id: RequestId::new(id),
        message: message.to_owned(),
    })
}

fn response(id: &str, sequence: u32, total: u32, payload: &str) -> Frame {
    Frame::Response(ResponseFrame {
        request_id: RequestId::new(id),
        sequence,
        total,
        payload: payload.to_owned(),
    })
}

#[test]
fn encodes_request_frame() {
    assert_eq!(
        request("AbCd", "find my vowels").encode(),
        "REQUEST:AbCd:find my vowels"
    );
}

#[test]
fn encodes_response_frame() {
    assert_eq!(
        response("AbCd", 1, 2, "vowel e at position 2").encode(),
        "RESPONSE:AbCd:1:2:vowel e at position 2"
    );
}

#[test]
fn decodes_request_frame() {
    let decoded = Frame::decode("REQUEST:AbCd:find my vowels").expect("valid request");
    assert_eq!(decoded, request("AbCd", "find my vowels"));
}

#[test]
fn request_message_may_contain_colons() {
    let decoded = Frame::decode("REQUEST:AbCd:time: 10:45").expect("valid request");
    assert_eq!(decoded, request("AbCd", "time: 10:45"));
}

#[test]
fn decodes_response_frame() {
    let decoded = Frame::decode("RESPONSE:AbCd:0:2:vowel e at position 1").expect("valid response");
    assert_eq!(decoded, response("AbCd", 0, 2, "vowel e at position 1"));
}

#[test]
fn response_payload_may_contain_colons() {
    let decoded = Frame::decode("RESPONSE:AbCd:3:7:ratio 1:2:3").expect("valid response");
    assert_eq!(decoded, response("AbCd", 3, 7, "ratio 1:2:3"));
}

#[test]
fn empty_payload_round_trips() {
    let frame = response("AbCd", 0, 1, "");
    assert_eq!(Frame::decode(&frame.encode()).expect("valid frame"), frame);
}

#[test]
fn rejects_frame_without_delimiter() {
    assert_eq!(Frame::decode("garbage"), Err(WireError::MissingTag));
}

#[test]
fn rejects_unknown_tag() {
    assert_eq!(
        Frame::decode("PING:AbCd:hello"),
        Err(WireError::UnknownTag("PING".to_owned()))
    );
}

#[rstest]
#[case::bare_request("REQUEST:AbCd")]
#[case::empty_request("REQUEST:")]
fn rejects_request_with_missing_fields(#[case] text: &str) {
    assert_eq!(
        Frame::decode(text),
        Err(WireError::MissingFields { kind: "REQUEST" })
    );
}

#[rstest]
#[case::no_payload("RESPONSE:AbCd:0:2")]
#[case::no_total("RESPONSE:AbCd:0")]
#[case::id_only("RESPONSE:AbCd")]
fn rejects_response_with_missing_fields(#[case] text: &str) {
    assert_eq!(
        Frame::decode(text),
        Err(WireError::MissingFields { kind: "RESPONSE" })
    );
}

#[rstest]
#[case::alphabetic("RESPONSE:AbCd:one:2:text", "sequence", "one")]
#[case::negative("RESPONSE:AbCd:-1:2:text", "sequence", "-1")]
#[case::total_overflow("RESPONSE:AbCd:0:99999999999:text", "total", "99999999999")]
fn rejects_non_numeric_counters(
    #[case] text: &str,
    #[case] field: &'static str,
    #[case] value: &str,
) {
    assert_eq!(
        Frame::decode(text),
        Err(WireError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
    );
}

#[test]
fn rejects_non_utf8_datagram() {
    let err = Frame::decode_datagram(&[0xff, 0xfe, b'R']).expect_err("invalid utf-8");
    assert!(matches!(err, WireError::InvalidUtf8(_)));
}
