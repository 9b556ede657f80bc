//! Datagram handler decoding requests and invoking the dispatcher.

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use tokio::net::UdpSocket;

use crate::{
    dispatch::{Dispatcher, Responder},
    metrics,
    transport::DatagramHandler,
    wire::Frame,
};

/// Server-side receive handler.
#[derive(Debug)]
pub(super) struct ServerHandler<R> {
    socket: Arc<UdpSocket>,
    dispatcher: Dispatcher<R>,
}

impl<R> ServerHandler<R> {
    pub(super) fn new(socket: Arc<UdpSocket>, dispatcher: Dispatcher<R>) -> Self {
        Self { socket, dispatcher }
    }
}

#[async_trait]
impl<R: Responder> DatagramHandler for ServerHandler<R> {
    async fn on_ready(&self, local: SocketAddr) {
        tracing::info!(%local, "server listening");
    }

    async fn on_datagram(&self, payload: &[u8], peer: SocketAddr) {
        match Frame::decode_datagram(payload) {
            Ok(Frame::Request(frame)) => {
                tracing::debug!(id = %frame.request_id, %peer, "handling request");
                if let Err(error) = self.dispatcher.dispatch(&self.socket, frame, peer).await {
                    tracing::warn!(%peer, %error, "failed to dispatch response");
                }
            }
            Ok(Frame::Response(_)) => {
                tracing::debug!(%peer, "ignoring response frame on server socket");
                metrics::inc_discarded();
            }
            Err(error) => {
                tracing::debug!(%peer, %error, "discarding malformed datagram");
                metrics::inc_discarded();
            }
        }
    }
}
