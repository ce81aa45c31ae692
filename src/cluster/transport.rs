//! Transport seam between the bridge and the node protocol.
//!
//! # Responsibilities
//! - Define what the bridge needs from a cluster client: connect, send to a
//!   registered name, receive classified frames
//! - Keep the node runtime substitutable (production TCP, scripted doubles)
//!
//! # Design Decisions
//! - `next_frame` is infallible at the trait level: connection failures are
//!   reported as `ProtocolError` frames and classified by the caller
//! - One connection serves exactly one in-flight call, so a connection owns
//!   exactly one correlation token

use async_trait::async_trait;

use crate::cluster::frame::InboundFrame;
use crate::cluster::identity::{CorrelationToken, NodeIdentity, RemoteTarget};
use crate::cluster::term::Term;
use crate::error::Fault;

/// Factory for per-call connections to remote nodes.
#[async_trait]
pub trait ClusterTransport: Send + Sync {
    /// Join the cluster as `identity` and open a connection to `target`.
    ///
    /// A single failed attempt is terminal; no retry happens at this layer.
    async fn connect(
        &self,
        identity: &NodeIdentity,
        target: &RemoteTarget,
    ) -> Result<Box<dyn ClusterConnection>, Fault>;
}

/// A live connection to one remote node, owned by one bridged call.
#[async_trait]
pub trait ClusterConnection: Send {
    /// Token the remote side addresses its reply to. Valid only for frames
    /// exchanged over this connection.
    fn token(&self) -> &CorrelationToken;

    /// Deliver a message to whatever process is registered under `process`
    /// on the remote node. Fire-and-forget: no delivery acknowledgment.
    async fn send_to_registered(&mut self, process: &str, message: Term) -> Result<(), Fault>;

    /// Produce the next inbound frame.
    async fn next_frame(&mut self) -> InboundFrame;
}
