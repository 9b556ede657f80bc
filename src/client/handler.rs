//! Datagram handler feeding response fragments into the coordinator.

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;

use crate::{metrics, reassembly::Coordinator, transport::DatagramHandler, wire::Frame};

/// Client-side receive handler.
///
/// Decodes each datagram and forwards response frames to the coordinator.
/// Anything else (malformed frames, request frames aimed at the wrong
/// socket) is logged and dropped without touching pending state.
#[derive(Debug)]
pub(super) struct RecvHandler {
    coordinator: Arc<Coordinator>,
}

impl RecvHandler {
    pub(super) fn new(coordinator: Arc<Coordinator>) -> Self { Self { coordinator } }
}

#[async_trait]
impl DatagramHandler for RecvHandler {
    async fn on_datagram(&self, payload: &[u8], peer: SocketAddr) {
        match Frame::decode_datagram(payload) {
            Ok(Frame::Response(frame)) => self.coordinator.accept(frame),
            Ok(Frame::Request(_)) => {
                tracing::debug!(%peer, "ignoring request frame on client socket");
                metrics::inc_discarded();
            }
            Err(error) => {
                tracing::debug!(%peer, %error, "discarding malformed datagram");
                metrics::inc_discarded();
            }
        }
    }
}
