//! The server role: decode requests and dispatch fragment responses.

mod handler;

use std::{io, net::SocketAddr, sync::Arc};

use tokio::{net::UdpSocket, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use self::handler::ServerHandler;
use crate::{
    config::ServerConfig,
    dispatch::{Dispatcher, Responder},
    transport,
};

/// Server endpoint answering multipart requests with `responder`.
///
/// The server keeps no per-request state: every inbound request is decoded,
/// answered through the [`Dispatcher`], and forgotten.
#[derive(Debug)]
pub struct MultipartServer<R> {
    socket: Arc<UdpSocket>,
    handler: Arc<ServerHandler<R>>,
    shutdown: CancellationToken,
}

impl<R: Responder> MultipartServer<R> {
    /// Bind the server socket.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the socket cannot be bound.
    pub async fn bind(config: ServerConfig, responder: R) -> io::Result<Self> {
        let socket = Arc::new(UdpSocket::bind(config.bind_addr).await?);
        let dispatcher = Dispatcher::new(responder)
            .with_order(config.order)
            .with_fragment_delay(config.fragment_delay);
        let handler = Arc::new(ServerHandler::new(Arc::clone(&socket), dispatcher));
        Ok(Self {
            socket,
            handler,
            shutdown: CancellationToken::new(),
        })
    }

    /// Local address of the server socket.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the address cannot be read.
    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.socket.local_addr() }

    /// Serve requests until the shutdown token fires.
    ///
    /// # Errors
    ///
    /// Returns an error only when the socket's local address cannot be read
    /// at startup; per-request failures are logged and absorbed.
    pub async fn run(self) -> io::Result<()> {
        transport::run(self.socket, self.handler, self.shutdown).await
    }

    /// Serve requests on a background task, returning a shutdown handle.
    #[must_use]
    pub fn spawn(self) -> ServerHandle {
        let shutdown = self.shutdown.clone();
        let task = tokio::spawn(self.run());
        ServerHandle { shutdown, task }
    }
}

/// Handle to a server running on a background task.
#[derive(Debug)]
pub struct ServerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<io::Result<()>>,
}

impl ServerHandle {
    /// Signal shutdown and wait for the serve loop to exit.
    ///
    /// # Errors
    ///
    /// Returns the serve loop's error, if it failed before shutdown.
    pub async fn shutdown(self) -> io::Result<()> {
        self.shutdown.cancel();
        match self.task.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => Ok(()),
            Err(join_error) => Err(io::Error::other(join_error)),
        }
    }
}
