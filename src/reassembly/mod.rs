//! Client-side reassembly of multipart responses.
//!
//! The [`Coordinator`] owns one [`PendingResponse`](pending::PendingResponse)
//! per in-flight request, keyed by [`RequestId`](crate::request_id::RequestId).
//! Arriving fragments are accumulated by sequence number with overwrite
//! semantics, so duplicated and reordered delivery is harmless; a one-shot
//! signal fires exactly once when the final fragment lands.
//!
//! Registration hands back a [`PendingTicket`] whose drop guard removes the
//! tracking entry. Completion, timeout, and cancellation all funnel through
//! that guard, so per-request state is reclaimed on every exit path and late
//! fragments for a finished request fall into the stray path.

mod coordinator;
pub mod error;
mod pending;

pub use coordinator::{Coordinator, PendingTicket};
pub use error::RequestError;
