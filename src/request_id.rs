//! Request identifiers and their bounded-retry generator.
//!
//! A [`RequestId`] is a short random token correlating one logical request
//! with all of its response fragments. Identifiers only need to be unique
//! among the requests pending at the moment of creation; once a request is
//! removed its identifier may be reused by an unrelated new request.

use rand::{Rng, rng};
use thiserror::Error;

/// Default identifier length in characters.
pub const DEFAULT_ID_LENGTH: usize = 4;
/// Default number of samples before giving up on finding a free identifier.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Alphabet identifiers are drawn from (ASCII letters, both cases).
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Opaque correlation token for one logical request.
///
/// # Examples
///
/// ```
/// use multigram::request_id::RequestId;
/// let id = RequestId::new("AbCd");
/// assert_eq!(id.as_str(), "AbCd");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Create an identifier from an arbitrary token.
    ///
    /// Tokens decoded off the wire are accepted verbatim; only locally
    /// generated identifiers are guaranteed to match the configured length
    /// and alphabet.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

    /// Borrow the token text.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// The identifier space could not yield a free token within the retry bound.
///
/// With the default four-letter alphabet this only occurs when the pending
/// set is a large fraction of the 52^4 token space, which in practice means
/// requests are leaking rather than the space being genuinely full.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("request id space exhausted after {attempts} attempts")]
pub struct IdSpaceExhausted {
    /// Number of candidates sampled before giving up.
    pub attempts: usize,
}

/// Samples random fixed-length identifiers with a bounded retry loop.
#[derive(Clone, Copy, Debug)]
pub struct IdGenerator {
    length: usize,
    max_attempts: usize,
}

impl IdGenerator {
    /// Create a generator producing identifiers of `length` characters,
    /// retrying at most `max_attempts` times against a taken set.
    #[must_use]
    pub const fn new(length: usize, max_attempts: usize) -> Self {
        Self {
            length,
            max_attempts,
        }
    }

    /// Retry bound applied by [`generate`](Self::generate).
    #[must_use]
    pub const fn max_attempts(&self) -> usize { self.max_attempts }

    /// Draw one random candidate identifier.
    ///
    /// Candidates are sampled uniformly from the ASCII-letter alphabet using
    /// the thread-local RNG; uniqueness is the caller's concern.
    #[must_use]
    pub fn sample(&self) -> RequestId {
        let mut rng = rng();
        let token = (0..self.length)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect::<String>();
        RequestId(token)
    }

    /// Generate an identifier that `is_taken` reports as free.
    ///
    /// Samples at most [`max_attempts`](Self::max_attempts) candidates, so
    /// termination is guaranteed even when the caller's pending set saturates
    /// the identifier space.
    ///
    /// # Errors
    ///
    /// Returns [`IdSpaceExhausted`] when every sampled candidate was taken.
    pub fn generate(
        &self,
        mut is_taken: impl FnMut(&RequestId) -> bool,
    ) -> Result<RequestId, IdSpaceExhausted> {
        for _ in 0..self.max_attempts {
            let candidate = self.sample();
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
        Err(IdSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for IdGenerator {
    fn default() -> Self { Self::new(DEFAULT_ID_LENGTH, DEFAULT_MAX_ATTEMPTS) }
}
