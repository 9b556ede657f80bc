use super::WireError;
use crate::request_id::RequestId;

/// Tag prefixing every request frame.
pub const REQUEST_TAG: &str = "REQUEST";
/// Tag prefixing every response frame.
pub const RESPONSE_TAG: &str = "RESPONSE";

/// A client request carrying the message to be answered in fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestFrame {
    /// Correlation token linking the request to its response fragments.
    pub request_id: RequestId,
    /// The request message. May contain colons.
    pub message: String,
}

/// One fragment of a logical response.
///
/// Fragments are immutable once sent and carry everything a receiver needs
/// to place them: the request they answer, their zero-based position, and
/// the total number of fragments in the response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseFrame {
    /// Correlation token of the request this fragment answers.
    pub request_id: RequestId,
    /// Zero-based position of this fragment within the response.
    pub sequence: u32,
    /// Total number of fragments in the response.
    pub total: u32,
    /// Fragment text. May contain colons.
    pub payload: String,
}

/// The two frame shapes understood by the protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// `REQUEST:<id>:<message>`
    Request(RequestFrame),
    /// `RESPONSE:<id>:<sequence>:<total>:<payload>`
    Response(ResponseFrame),
}

impl Frame {
    /// Encode the frame into its textual wire form.
    ///
    /// # Examples
    ///
    /// ```
    /// use multigram::{
    ///     request_id::RequestId,
    ///     wire::{Frame, RequestFrame},
    /// };
    /// let frame = Frame::Request(RequestFrame {
    ///     request_id: RequestId::new("AbCd"),
    ///     message: "find my vowels".into(),
    /// });
    /// assert_eq!(frame.encode(), "REQUEST:AbCd:find my vowels");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Frame::Request(request) => {
                format!("{REQUEST_TAG}:{}:{}", request.request_id, request.message)
            }
            Frame::Response(response) => format!(
                "{RESPONSE_TAG}:{}:{}:{}:{}",
                response.request_id, response.sequence, response.total, response.payload
            ),
        }
    }

    /// Decode a raw datagram payload into a frame.
    ///
    /// # Errors
    ///
    /// Returns a [`WireError`] when the payload is not UTF-8 or does not
    /// match either frame shape.
    pub fn decode_datagram(payload: &[u8]) -> Result<Frame, WireError> {
        Frame::decode(std::str::from_utf8(payload)?)
    }

    /// Decode a textual frame.
    ///
    /// The trailing field of each frame shape absorbs any remaining colons,
    /// so messages and fragment payloads round-trip even when they contain
    /// the delimiter.
    ///
    /// # Errors
    ///
    /// Returns a [`WireError`] describing the first structural problem
    /// encountered.
    pub fn decode(text: &str) -> Result<Frame, WireError> {
        let (tag, rest) = text.split_once(':').ok_or(WireError::MissingTag)?;
        match tag {
            REQUEST_TAG => decode_request(rest),
            RESPONSE_TAG => decode_response(rest),
            other => Err(WireError::UnknownTag(other.to_owned())),
        }
    }
}

fn decode_request(rest: &str) -> Result<Frame, WireError> {
    let (id, message) = rest.split_once(':').ok_or(WireError::MissingFields {
        kind: REQUEST_TAG,
    })?;
    Ok(Frame::Request(RequestFrame {
        request_id: RequestId::new(id),
        message: message.to_owned(),
    }))
}

fn decode_response(rest: &str) -> Result<Frame, WireError> {
    let mut fields = rest.splitn(4, ':');
    let missing = WireError::MissingFields {
        kind: RESPONSE_TAG,
    };
    let id = fields.next().ok_or(missing.clone())?;
    let sequence = fields.next().ok_or(missing.clone())?;
    let total = fields.next().ok_or(missing.clone())?;
    let payload = fields.next().ok_or(missing)?;

    Ok(Frame::Response(ResponseFrame {
        request_id: RequestId::new(id),
        sequence: parse_field("sequence", sequence)?,
        total: parse_field("total", total)?,
        payload: payload.to_owned(),
    }))
}

fn parse_field(field: &'static str, value: &str) -> Result<u32, WireError> {
    value.parse().map_err(|_| WireError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}
