//! Accumulation state for one in-flight request.

use std::collections::BTreeMap;

use tokio::sync::oneshot;

/// Fragments received so far for a single pending request.
///
/// The sequence-keyed map gives overwrite semantics for duplicates and
/// ascending iteration for the final ordered read-out. The completion signal
/// is taken on first fire, so a duplicate of the last fragment cannot fire
/// it twice.
#[derive(Debug)]
pub(crate) struct PendingResponse {
    received: BTreeMap<u32, String>,
    signal: Option<oneshot::Sender<()>>,
}

impl PendingResponse {
    pub(crate) fn new(signal: oneshot::Sender<()>) -> Self {
        Self {
            received: BTreeMap::new(),
            signal: Some(signal),
        }
    }

    /// Record a fragment and fire the completion signal once every sequence
    /// number in `[0, total)` has been observed.
    pub(crate) fn accept(&mut self, sequence: u32, total: u32, payload: String) {
        self.received.insert(sequence, payload);
        if self.received.len() == total as usize
            && let Some(signal) = self.signal.take()
        {
            // The receiver half only disappears with the tracking entry, so
            // a send failure here is unreachable in practice.
            let _ = signal.send(());
        }
    }

    pub(crate) fn fragment_count(&self) -> usize { self.received.len() }

    /// Consume the state, yielding payloads in ascending sequence order.
    pub(crate) fn into_ordered(self) -> Vec<String> { self.received.into_values().collect() }
}
