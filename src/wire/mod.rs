//! Wire frames for the multipart request/response protocol.
//!
//! Frames are colon-delimited text, one frame per datagram:
//!
//! - request: `REQUEST:<id>:<message>`
//! - response: `RESPONSE:<id>:<sequence>:<total>:<payload>`
//!
//! The message and payload fields occupy the remainder of the frame, so both
//! may contain colons. Decoding never panics; malformed input surfaces as a
//! [`WireError`] that callers log and discard at the transport edge.

pub mod error;
mod frame;

pub use error::WireError;
pub use frame::{Frame, REQUEST_TAG, RESPONSE_TAG, RequestFrame, ResponseFrame};

#[cfg(test)]
mod tests;
