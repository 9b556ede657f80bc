//! Server-side splitting of responses into sequenced fragments.
//!
//! The [`Dispatcher`] holds no per-request state: each inbound request is
//! answered by invoking the [`Responder`], numbering the produced fragments
//! `0..N-1`, and emitting one datagram per fragment. Delivery order is
//! deliberately decoupled from sequence order: with
//! [`DispatchOrder::Shuffled`] the fragments leave in a random permutation,
//! exercising the reordering tolerance the client must provide.

pub mod error;
mod responder;

use std::{net::SocketAddr, time::Duration};

use rand::{rng, seq::SliceRandom};
use tokio::{net::UdpSocket, time};

pub use error::DispatchError;
pub use responder::{Responder, VowelFinder};

use crate::{
    metrics,
    wire::{Frame, RequestFrame, ResponseFrame},
};

/// Order in which response fragments are put on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchOrder {
    /// Send fragments in ascending sequence order.
    Sequential,
    /// Send fragments in a random permutation. The protocol promises nothing
    /// about delivery order, so clients must cope either way; shuffling
    /// keeps that property exercised.
    #[default]
    Shuffled,
}

/// Stateless fragment emitter for the server role.
#[derive(Debug)]
pub struct Dispatcher<R> {
    responder: R,
    order: DispatchOrder,
    fragment_delay: Option<Duration>,
}

impl<R: Responder> Dispatcher<R> {
    /// Create a dispatcher answering requests with `responder`.
    #[must_use]
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            order: DispatchOrder::default(),
            fragment_delay: None,
        }
    }

    /// Select the on-wire fragment order.
    #[must_use]
    pub fn with_order(mut self, order: DispatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Sleep between fragment sends, simulating a slow or jittery peer.
    #[must_use]
    pub fn with_fragment_delay(mut self, delay: Option<Duration>) -> Self {
        self.fragment_delay = delay;
        self
    }

    /// Answer one request by sending its response fragments to `peer`.
    ///
    /// A responder that produces zero fragments results in zero datagrams;
    /// the requester is expected to rely on its own timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the fragment count overflows the wire
    /// format's counter or a send fails.
    pub async fn dispatch(
        &self,
        socket: &UdpSocket,
        request: RequestFrame,
        peer: SocketAddr,
    ) -> Result<(), DispatchError> {
        let fragments = self.responder.respond(&request.message);
        let (total, mut plan) = sequence_fragments(fragments)?;

        if plan.is_empty() {
            tracing::debug!(id = %request.request_id, %peer, "request produced no fragments");
            return Ok(());
        }
        if self.order == DispatchOrder::Shuffled {
            plan.shuffle(&mut rng());
        }

        for (sequence, payload) in plan {
            if let Some(delay) = self.fragment_delay {
                time::sleep(delay).await;
            }
            let frame = Frame::Response(ResponseFrame {
                request_id: request.request_id.clone(),
                sequence,
                total,
                payload,
            });
            socket.send_to(frame.encode().as_bytes(), peer).await?;
            metrics::inc_datagrams(metrics::Direction::Outbound);
        }
        tracing::debug!(id = %request.request_id, %peer, total, "response dispatched");
        Ok(())
    }
}

/// Pair each fragment with its zero-based sequence number and return the
/// total fragment count.
///
/// # Errors
///
/// Returns [`DispatchError::TooManyFragments`] when the count does not fit
/// the wire format's `u32` total.
fn sequence_fragments(
    fragments: Vec<String>,
) -> Result<(u32, Vec<(u32, String)>), DispatchError> {
    let total = u32::try_from(fragments.len()).map_err(|_| DispatchError::TooManyFragments {
        count: fragments.len(),
    })?;
    Ok((total, (0_u32..).zip(fragments).collect()))
}

#[cfg(test)]
mod tests;
