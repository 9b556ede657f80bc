//! Error type emitted when decoding inbound datagrams.

use std::str::Utf8Error;

use thiserror::Error;

/// Errors produced while decoding a datagram into a [`Frame`](super::Frame).
///
/// Every variant is non-fatal: receive loops log the error and drop the
/// datagram without disturbing in-flight requests.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// The datagram is not valid UTF-8.
    #[error("frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
    /// The frame has no tag delimiter at all.
    #[error("frame has no tag delimiter")]
    MissingTag,
    /// The frame tag is neither `REQUEST` nor `RESPONSE`.
    #[error("unknown frame tag {0:?}")]
    UnknownTag(String),
    /// A `REQUEST` or `RESPONSE` frame is missing required fields.
    #[error("{kind} frame is missing fields")]
    MissingFields { kind: &'static str },
    /// A numeric field does not parse as an unsigned integer.
    #[error("invalid {field} field {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}
