//! The client role: issue requests and await reassembled responses.

mod handler;

use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use tokio::{net::UdpSocket, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use self::handler::RecvHandler;
use crate::{
    config::ClientConfig,
    reassembly::{Coordinator, RequestError},
    request_id::IdGenerator,
    transport,
    wire::{Frame, RequestFrame},
};

/// Client endpoint for the multipart request/response protocol.
///
/// Owns an ephemeral UDP socket and a background receive task that feeds
/// response fragments into the [`Coordinator`]. Multiple requests may be in
/// flight concurrently; each is correlated by its generated identifier.
#[derive(Debug)]
pub struct MultipartClient {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    coordinator: Arc<Coordinator>,
    request_timeout: Option<Duration>,
    shutdown: CancellationToken,
    recv_task: JoinHandle<()>,
}

impl MultipartClient {
    /// Bind a local socket and start the receive loop.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the socket cannot be bound.
    pub async fn connect(config: ClientConfig) -> io::Result<Self> {
        let socket = Arc::new(UdpSocket::bind(ephemeral_bind_addr(config.peer)).await?);
        let coordinator = Arc::new(Coordinator::new(IdGenerator::new(
            config.id_length,
            config.id_max_attempts,
        )));
        let shutdown = CancellationToken::new();

        let handler = Arc::new(RecvHandler::new(Arc::clone(&coordinator)));
        let recv_task = tokio::spawn({
            let socket = Arc::clone(&socket);
            let shutdown = shutdown.clone();
            async move {
                if let Err(error) = transport::run(socket, handler, shutdown).await {
                    tracing::error!(%error, "client receive loop failed");
                }
            }
        });

        Ok(Self {
            socket,
            peer: config.peer,
            coordinator,
            request_timeout: config.request_timeout,
            shutdown,
            recv_task,
        })
    }

    /// Local address of the client socket.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the address cannot be read.
    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.socket.local_addr() }

    /// Number of requests currently awaiting fragments.
    #[must_use]
    pub fn pending_requests(&self) -> usize { self.coordinator.pending_len() }

    /// Send `message` and suspend until the full response has arrived,
    /// returning its fragments in sequence order.
    ///
    /// Uses the configured default timeout. Cancelling the returned future
    /// removes the request's tracking state; fragments that arrive afterwards
    /// are discarded as strays.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on timeout, identifier exhaustion, or send
    /// failure. Tracking state is removed on every error path.
    pub async fn request(&self, message: &str) -> Result<Vec<String>, RequestError> {
        self.request_with_timeout(message, self.request_timeout).await
    }

    /// [`request`](Self::request) with a per-call timeout override.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on timeout, identifier exhaustion, or send
    /// failure.
    pub async fn request_with_timeout(
        &self,
        message: &str,
        timeout: Option<Duration>,
    ) -> Result<Vec<String>, RequestError> {
        let ticket = self.coordinator.register()?;
        let frame = Frame::Request(RequestFrame {
            request_id: ticket.id().clone(),
            message: message.to_owned(),
        });

        tracing::debug!(id = %ticket.id(), peer = %self.peer, "sending request");
        // An early return here drops the ticket, which removes the pending
        // entry before the error propagates.
        self.socket
            .send_to(frame.encode().as_bytes(), self.peer)
            .await?;

        ticket.wait(timeout).await
    }

    /// Stop the receive loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.recv_task.await;
    }
}

/// Pick an unspecified local address in the peer's address family.
fn ephemeral_bind_addr(peer: SocketAddr) -> SocketAddr {
    let ip = match peer {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, 0)
}
