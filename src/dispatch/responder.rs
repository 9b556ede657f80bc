//! The domain-function boundary between the protocol and its payloads.

/// Turns a request message into an ordered sequence of fragment payloads.
///
/// Responders are pure and stateless from the protocol's point of view: the
/// dispatcher calls [`respond`](Responder::respond) once per request and
/// attaches no meaning to the fragment texts. An empty result is valid and
/// sends nothing.
pub trait Responder: Send + Sync + 'static {
    /// Compute the fragment payloads for `message`, in sequence order.
    fn respond(&self, message: &str) -> Vec<String>;
}

impl<F> Responder for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
{
    fn respond(&self, message: &str) -> Vec<String> { self(message) }
}

/// Demo responder reporting the position of every vowel in the message.
///
/// # Examples
///
/// ```
/// use multigram::dispatch::{Responder, VowelFinder};
/// assert_eq!(
///     VowelFinder.respond("bee"),
///     vec!["vowel e at position 1", "vowel e at position 2"],
/// );
/// assert!(VowelFinder.respond("xyz").is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct VowelFinder;

impl Responder for VowelFinder {
    fn respond(&self, message: &str) -> Vec<String> {
        message
            .chars()
            .enumerate()
            .filter(|(_, c)| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
            .map(|(position, c)| format!("vowel {c} at position {position}"))
            .collect()
    }
}
