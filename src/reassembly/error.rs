//! Error type returned from client request operations.

use std::{io, time::Duration};

use thiserror::Error;

use crate::request_id::IdSpaceExhausted;

/// Errors produced while issuing a request and awaiting its response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    /// The response did not complete within the configured bound.
    ///
    /// The protocol does not retransmit, so a single lost fragment stalls a
    /// request permanently; the timeout converts that stall into a failure.
    #[error("no complete response within {limit:?}")]
    Timeout { limit: Duration },
    /// No free request identifier could be found.
    #[error(transparent)]
    IdSpaceExhausted(#[from] IdSpaceExhausted),
    /// The pending entry disappeared before the response completed, which
    /// means the coordinator is shutting down.
    #[error("request abandoned before the response completed")]
    Abandoned,
    /// Sending the request datagram failed.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}
