//! Public API for the `multigram` library.
//!
//! This crate implements a minimal multipart request/response protocol over
//! UDP: a server splits each response into independently delivered,
//! sequence-numbered fragments, and a client reassembles them regardless of
//! arrival order, duplication, or stray traffic. Loss is handled only by the
//! client's request timeout; the protocol does not retransmit.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod metrics;
pub mod reassembly;
pub mod request_id;
pub mod server;
pub mod transport;
pub mod wire;

pub use client::MultipartClient;
pub use config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, ServerConfig};
pub use dispatch::{DispatchError, DispatchOrder, Dispatcher, Responder, VowelFinder};
pub use reassembly::{Coordinator, PendingTicket, RequestError};
pub use request_id::{IdGenerator, IdSpaceExhausted, RequestId};
pub use server::{MultipartServer, ServerHandle};
pub use transport::{DatagramHandler, MAX_DATAGRAM_LEN};
pub use wire::{Frame, RequestFrame, ResponseFrame, WireError};
