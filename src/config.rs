//! Configuration for the client and server roles.
//!
//! Addresses, identifier parameters, timeouts, and dispatch behaviour are
//! configuration, not protocol: two peers only need to agree on the wire
//! frames.

use std::{net::SocketAddr, time::Duration};

use crate::{
    dispatch::DispatchOrder,
    request_id::{DEFAULT_ID_LENGTH, DEFAULT_MAX_ATTEMPTS},
};

/// Default bound on how long a request waits for its response to complete.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`MultipartClient`](crate::client::MultipartClient).
#[derive(Clone, Copy, Debug)]
pub struct ClientConfig {
    /// Address of the server answering requests.
    pub peer: SocketAddr,
    /// Length of generated request identifiers.
    pub id_length: usize,
    /// Retry bound for identifier generation.
    pub id_max_attempts: usize,
    /// Default per-request timeout. `None` waits forever; a lost fragment
    /// then stalls the request permanently.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Configuration with library defaults, talking to `peer`.
    #[must_use]
    pub const fn new(peer: SocketAddr) -> Self {
        Self {
            peer,
            id_length: DEFAULT_ID_LENGTH,
            id_max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Override the default request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the generated identifier length.
    #[must_use]
    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length;
        self
    }

    /// Override the identifier generation retry bound.
    #[must_use]
    pub fn with_id_max_attempts(mut self, attempts: usize) -> Self {
        self.id_max_attempts = attempts;
        self
    }
}

/// Settings for [`MultipartServer`](crate::server::MultipartServer).
#[derive(Clone, Copy, Debug)]
pub struct ServerConfig {
    /// Address the server socket binds to. Use port 0 for an ephemeral port.
    pub bind_addr: SocketAddr,
    /// On-wire fragment order.
    pub order: DispatchOrder,
    /// Optional delay between fragment sends.
    pub fragment_delay: Option<Duration>,
}

impl ServerConfig {
    /// Configuration with library defaults, binding to `bind_addr`.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            order: DispatchOrder::Shuffled,
            fragment_delay: None,
        }
    }

    /// Override the on-wire fragment order.
    #[must_use]
    pub fn with_order(mut self, order: DispatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Delay each fragment send by `delay`.
    #[must_use]
    pub fn with_fragment_delay(mut self, delay: Option<Duration>) -> Self {
        self.fragment_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, ServerConfig};
    use crate::dispatch::DispatchOrder;

    #[test]
    fn client_defaults() {
        let config = ClientConfig::new("127.0.0.1:9999".parse().expect("addr"));
        assert_eq!(config.id_length, 4);
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
    }

    #[test]
    fn client_overrides_chain() {
        let config = ClientConfig::new("127.0.0.1:9999".parse().expect("addr"))
            .with_request_timeout(None)
            .with_id_length(8)
            .with_id_max_attempts(16);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.id_length, 8);
        assert_eq!(config.id_max_attempts, 16);
    }

    #[test]
    fn server_defaults_shuffle() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("addr"));
        assert_eq!(config.order, DispatchOrder::Shuffled);
        assert_eq!(config.fragment_delay, None);

        let sequential = config
            .with_order(DispatchOrder::Sequential)
            .with_fragment_delay(Some(Duration::from_millis(10)));
        assert_eq!(sequential.order, DispatchOrder::Sequential);
    }
}
