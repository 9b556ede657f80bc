//! Metric helpers for `multigram`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate.

use metrics::counter;

/// Name of the counter tracking datagrams moved through the transport.
pub const DATAGRAMS_TOTAL: &str = "multigram_datagrams_total";
/// Name of the counter tracking discarded malformed frames.
pub const DISCARDED_FRAMES_TOTAL: &str = "multigram_discarded_frames_total";
/// Name of the counter tracking stray response fragments.
pub const STRAY_FRAGMENTS_TOTAL: &str = "multigram_stray_fragments_total";
/// Name of the counter tracking completed requests.
pub const REQUESTS_COMPLETED_TOTAL: &str = "multigram_requests_completed_total";
/// Name of the counter tracking timed-out requests.
pub const REQUESTS_TIMED_OUT_TOTAL: &str = "multigram_requests_timed_out_total";

/// Direction of datagram flow.
#[derive(Clone, Copy)]
pub enum Direction {
    /// Inbound datagrams received from a peer.
    Inbound,
    /// Outbound datagrams sent to a peer.
    Outbound,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Record a datagram moved in the given direction.
pub fn inc_datagrams(direction: Direction) {
    counter!(DATAGRAMS_TOTAL, "direction" => direction.as_str()).increment(1);
}

/// Record a datagram discarded because it failed to decode.
pub fn inc_discarded() { counter!(DISCARDED_FRAMES_TOTAL).increment(1); }

/// Record a response fragment that matched no pending request.
pub fn inc_stray() { counter!(STRAY_FRAGMENTS_TOTAL).increment(1); }

/// Record a request that completed with a full response.
pub fn inc_completed() { counter!(REQUESTS_COMPLETED_TOTAL).increment(1); }

/// Record a request that timed out before its response completed.
pub fn inc_timed_out() { counter!(REQUESTS_TIMED_OUT_TOTAL).increment(1); }
