//! Error type emitted while dispatching response fragments.

use std::io;

use thiserror::Error;

/// Errors produced by [`Dispatcher::dispatch`](super::Dispatcher::dispatch).
///
/// Dispatch errors stay local to the request being answered; the server
/// logs them and keeps serving other traffic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The responder produced more fragments than the wire format's `u32`
    /// total can describe.
    #[error("response has {count} fragments, which overflows the wire format")]
    TooManyFragments { count: usize },
    /// Sending a fragment datagram failed.
    #[error("failed to send fragment: {0}")]
    Io(#[from] io::Error),
}
