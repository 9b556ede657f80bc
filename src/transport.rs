//! Datagram receive loop shared by the client and server roles.
//!
//! The transport makes no promises: datagrams may be reordered, duplicated,
//! or lost, and the rest of the crate is written against exactly that. The
//! [`DatagramHandler`] trait is the seam between socket plumbing and
//! protocol logic: a plain capability interface with two operations rather
//! than a base type to inherit from.

use std::{io, net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

use crate::metrics;

/// Largest datagram the receive loop will accept.
///
/// One logical fragment must fit in one datagram; 64 KiB is the UDP payload
/// ceiling, so nothing valid is ever truncated.
pub const MAX_DATAGRAM_LEN: usize = 64 * 1024;

/// Protocol-side half of the datagram transport.
#[async_trait]
pub trait DatagramHandler: Send + Sync + 'static {
    /// Called once with the bound local address before the first receive.
    async fn on_ready(&self, local: SocketAddr) { let _ = local; }

    /// Called for every inbound datagram.
    ///
    /// Implementations must tolerate arbitrary bytes: malformed payloads
    /// are logged and dropped, never propagated.
    async fn on_datagram(&self, payload: &[u8], peer: SocketAddr);
}

/// Drive `handler` with datagrams from `socket` until `shutdown` fires.
///
/// Receive failures are logged and the loop keeps serving; per the error
/// model nothing on this path is fatal.
///
/// # Errors
///
/// Returns an error only when the socket's local address cannot be read at
/// startup.
pub async fn run<H: DatagramHandler>(
    socket: Arc<UdpSocket>,
    handler: Arc<H>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    let local = socket.local_addr()?;
    handler.on_ready(local).await;
    tracing::debug!(%local, "datagram loop started");

    let mut buf = vec![0_u8; MAX_DATAGRAM_LEN];
    loop {
        tokio::select! {
            () = shutdown.cancelled() => {
                tracing::debug!(%local, "datagram loop stopped");
                return Ok(());
            }
            received = socket.recv_from(&mut buf) => {
                match received {
                    Ok((len, peer)) => {
                        metrics::inc_datagrams(metrics::Direction::Inbound);
                        handler.on_datagram(&buf[..len], peer).await;
                    }
                    Err(error) => {
                        // Transient per-datagram failures (e.g. ICMP port
                        // unreachable surfacing as ECONNRESET) must not kill
                        // the loop.
                        tracing::warn!(%local, %error, "datagram receive failed");
                    }
                }
            }
        }
    }
}
