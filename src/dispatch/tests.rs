//! Tests for fragment numbering, the demo responder, and wire dispatch.

use std::collections::BTreeMap;

use rstest::rstest;
use tokio::net::UdpSocket;

use super::{DispatchOrder, Dispatcher, Responder, VowelFinder, sequence_fragments};
use crate::{
    request_id::RequestId,
    wire::{Frame, RequestFrame},
};

#[test]
fn sequence_numbers_are_zero_based_and_dense() {
    let fragments = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let (total, plan) = sequence_fragments(fragments).expect("within u32");
    assert_eq!(total, 3);
    assert_eq!(
        plan,
        vec![
            (0, "a".to_owned()),
            (1, "b".to_owned()),
            (2, "c".to_owned())
        ]
    );
}

#[test]
fn empty_response_has_zero_total() {
    let (total, plan) = sequence_fragments(Vec::new()).expect("within u32");
    assert_eq!(total, 0);
    assert!(plan.is_empty());
}

#[rstest]
#[case::bee("bee", vec!["vowel e at position 1", "vowel e at position 2"])]
#[case::no_vowels("xyz", vec![])]
#[case::mixed_case("Aloe", vec![
    "vowel A at position 0",
    "vowel o at position 2",
    "vowel e at position 3",
])]
#[case::empty("", vec![])]
fn vowel_finder_reports_positions(#[case] message: &str, #[case] expected: Vec<&str>) {
    assert_eq!(VowelFinder.respond(message), expected);
}

#[test]
fn closures_are_responders() {
    let responder = |message: &str| vec![message.to_uppercase()];
    assert_eq!(responder.respond("hi"), vec!["HI"]);
}

async fn dispatch_and_collect(
    dispatcher: Dispatcher<impl Responder>,
    message: &str,
    expected: usize,
) -> Vec<Frame> {
    let server = UdpSocket::bind("127.0.0.1:0").await.expect("bind server");
    let sink = UdpSocket::bind("127.0.0.1:0").await.expect("bind sink");
    let sink_addr = sink.local_addr().expect("sink addr");

    let request = RequestFrame {
        request_id: RequestId::new("AbCd"),
        message: message.to_owned(),
    };
    dispatcher
        .dispatch(&server, request, sink_addr)
        .await
        .expect("dispatch");

    let mut frames = Vec::new();
    let mut buf = vec![0_u8; 64 * 1024];
    while let Ok(Ok((len, _))) = tokio::time::timeout(
        std::time::Duration::from_millis(500),
        sink.recv_from(&mut buf),
    )
    .await
    {
        frames.push(Frame::decode_datagram(&buf[..len]).expect("valid frame"));
        if frames.len() == expected {
            break;
        }
    }
    frames
}

#[tokio::test]
async fn dispatch_sends_one_datagram_per_fragment() {
    let dispatcher = Dispatcher::new(VowelFinder).with_order(DispatchOrder::Sequential);
    let frames = dispatch_and_collect(dispatcher, "bee", 2).await;

    assert_eq!(frames.len(), 2);
    let mut by_sequence = BTreeMap::new();
    for frame in frames {
        let Frame::Response(response) = frame else {
            panic!("dispatcher must only send response frames");
        };
        assert_eq!(response.request_id, RequestId::new("AbCd"));
        assert_eq!(response.total, 2);
        by_sequence.insert(response.sequence, response.payload);
    }
    assert_eq!(
        by_sequence.into_values().collect::<Vec<_>>(),
        vec!["vowel e at position 1", "vowel e at position 2"]
    );
}

#[tokio::test]
async fn shuffled_dispatch_preserves_the_fragment_set() {
    let responder =
        |_: &str| vec!["alpha".to_owned(), "beta".to_owned()];
    let dispatcher = Dispatcher::new(responder).with_order(DispatchOrder::Shuffled);
    let frames = dispatch_and_collect(dispatcher, "anything", 2).await;

    let mut by_sequence = BTreeMap::new();
    for frame in frames {
        let Frame::Response(response) = frame else {
            panic!("dispatcher must only send response frames");
        };
        by_sequence.insert(response.sequence, response.payload);
    }
    assert_eq!(
        by_sequence,
        BTreeMap::from([(0, "alpha".to_owned()), (1, "beta".to_owned())])
    );
}

#[tokio::test]
async fn empty_response_sends_nothing() {
    let dispatcher = Dispatcher::new(VowelFinder);
    let frames = dispatch_and_collect(dispatcher, "xyz", 0).await;
    assert!(frames.is_empty());
}
