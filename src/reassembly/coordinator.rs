//! Tracking of pending requests and completion detection.

use std::time::Duration;

use dashmap::{DashMap, mapref::entry::Entry};
use tokio::{sync::oneshot, time};

use super::{error::RequestError, pending::PendingResponse};
use crate::{
    metrics,
    request_id::{IdGenerator, IdSpaceExhausted, RequestId},
    wire::ResponseFrame,
};

/// Client-side registry of in-flight requests.
///
/// The shard-locked map serialises mutation between the receive path and
/// request issuance, so fragments may arrive from any task while requests
/// are being registered.
#[derive(Debug, Default)]
pub struct Coordinator {
    pending: DashMap<RequestId, PendingResponse>,
    ids: IdGenerator,
}

impl Coordinator {
    /// Create a coordinator drawing identifiers from `ids`.
    #[must_use]
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            pending: DashMap::new(),
            ids,
        }
    }

    /// Number of requests currently awaiting fragments.
    #[must_use]
    pub fn pending_len(&self) -> usize { self.pending.len() }

    /// Register a new pending request under a freshly generated identifier.
    ///
    /// The candidate identifier is claimed through the map's entry API, so
    /// two concurrent registrations can never share an id even if they
    /// sample the same candidate.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::IdSpaceExhausted`] when no free identifier
    /// was found within the generator's retry bound.
    pub fn register(&self) -> Result<PendingTicket<'_>, RequestError> {
        for _ in 0..self.ids.max_attempts() {
            let candidate = self.ids.sample();
            match self.pending.entry(candidate.clone()) {
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    let (signal, fired) = oneshot::channel();
                    slot.insert(PendingResponse::new(signal));
                    tracing::debug!(id = %candidate, "registered pending request");
                    return Ok(PendingTicket {
                        coordinator: self,
                        id: candidate,
                        fired,
                    });
                }
            }
        }
        Err(RequestError::IdSpaceExhausted(IdSpaceExhausted {
            attempts: self.ids.max_attempts(),
        }))
    }

    /// Feed one inbound response fragment into its pending request.
    ///
    /// Fragments for unknown identifiers are dropped silently; that is the
    /// normal fate of late, duplicate-after-completion, and stray traffic.
    pub fn accept(&self, frame: ResponseFrame) {
        let Some(mut entry) = self.pending.get_mut(&frame.request_id) else {
            tracing::trace!(
                id = %frame.request_id,
                sequence = frame.sequence,
                "dropping fragment for unknown request"
            );
            metrics::inc_stray();
            return;
        };
        if frame.sequence >= frame.total {
            tracing::debug!(
                id = %frame.request_id,
                sequence = frame.sequence,
                total = frame.total,
                "dropping fragment with out-of-range sequence"
            );
            return;
        }
        entry.accept(frame.sequence, frame.total, frame.payload);
    }

    fn remove(&self, id: &RequestId) -> Option<PendingResponse> {
        self.pending.remove(id).map(|(_, pending)| pending)
    }
}

/// Handle to one registered request.
///
/// Dropping the ticket removes the tracking entry, so cancellation cleans up
/// exactly like completion does. [`wait`](Self::wait) consumes the ticket on
/// the success path and removes the entry itself; the drop guard's second
/// removal is then a no-op.
#[derive(Debug)]
pub struct PendingTicket<'a> {
    coordinator: &'a Coordinator,
    id: RequestId,
    fired: oneshot::Receiver<()>,
}

impl PendingTicket<'_> {
    /// Identifier assigned to this request.
    #[must_use]
    pub fn id(&self) -> &RequestId { &self.id }

    /// Suspend until every fragment of the response has arrived, then return
    /// the fragments in ascending sequence order.
    ///
    /// `limit` bounds the wait; `None` waits without bound, in which case a
    /// lost fragment stalls the call forever.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Timeout`] when the bound elapses first, or
    /// [`RequestError::Abandoned`] if the tracking entry vanished while
    /// waiting. State is removed on every path.
    pub async fn wait(mut self, limit: Option<Duration>) -> Result<Vec<String>, RequestError> {
        let fired = match limit {
            Some(limit) => match time::timeout(limit, &mut self.fired).await {
                Ok(fired) => fired,
                Err(_) => {
                    tracing::debug!(id = %self.id, ?limit, "request timed out");
                    metrics::inc_timed_out();
                    return Err(RequestError::Timeout { limit });
                }
            },
            None => (&mut self.fired).await,
        };
        if fired.is_err() {
            return Err(RequestError::Abandoned);
        }

        let pending = self
            .coordinator
            .remove(&self.id)
            .ok_or(RequestError::Abandoned)?;
        tracing::debug!(
            id = %self.id,
            fragments = pending.fragment_count(),
            "request complete"
        );
        metrics::inc_completed();
        Ok(pending.into_ordered())
    }
}

impl Drop for PendingTicket<'_> {
    fn drop(&mut self) {
        // Idempotent: the success path already removed the entry.
        self.coordinator.remove(&self.id);
    }
}
