//! HTTP gateway bridging requests to workers on a message-passing cluster.
//!
//! Each inbound HTTP request becomes one synchronous bridged call: connect
//! to the configured remote node, send a `(token, method, uri)` envelope to
//! a registered worker process, absorb liveness pings until the correlated
//! reply arrives, decode it, and answer the HTTP request.

pub mod bridge;
pub mod cluster;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::BridgeConfig;
pub use error::{Fault, TimeoutStage};
pub use http::HttpServer;
