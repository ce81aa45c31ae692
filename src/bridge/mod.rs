//! Bridged-call orchestration.
//!
//! # Responsibilities
//! - Enforce the no-network precondition on required directives
//! - Sequence connect → send → receive loop → decode, short-circuiting on
//!   the first fault
//! - Bound the connect step and the reply wait with deadlines
//! - Classify inbound frames: absorb pings, terminate on error or delivery
//!
//! # Design Decisions
//! - Liveness pings never surface to the caller and never reset deadlines
//! - Any delivery on the connection is the reply; one connection serves one
//!   in-flight call, so no token table is needed
//! - The connection drops at the end of the call; there is no pooling, so
//!   every call pays full handshake cost

pub mod envelope;
pub mod reply;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cluster::frame::InboundFrame;
use crate::cluster::identity::{NodeIdentity, RemoteTarget};
use crate::cluster::transport::ClusterTransport;
use crate::config::TimeoutConfig;
use crate::error::{Fault, TimeoutStage};

pub use reply::ReplyTuple;

/// What the bridge consumes from an inbound HTTP request.
#[derive(Debug, Clone)]
pub struct BridgeRequest {
    /// HTTP method as an integer code.
    pub method_code: i64,
    /// Request path plus query string.
    pub uri: String,
}

/// Executes bridged calls against a cluster transport.
pub struct Bridge {
    transport: Arc<dyn ClusterTransport>,
    connect_timeout: Duration,
    reply_timeout: Duration,
}

impl Bridge {
    pub fn new(transport: Arc<dyn ClusterTransport>, timeouts: &TimeoutConfig) -> Self {
        Self {
            transport,
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            reply_timeout: Duration::from_secs(timeouts.reply_secs),
        }
    }

    /// Run one bridged call to completion.
    ///
    /// Connects to the target node as `identity`, sends the request
    /// envelope to the registered worker, waits for the correlated reply,
    /// and decodes it. The first fault at any stage is terminal.
    pub async fn invoke(
        &self,
        identity: &NodeIdentity,
        target: &RemoteTarget,
        request: &BridgeRequest,
    ) -> Result<ReplyTuple, Fault> {
        // Required directives, checked before any network activity.
        if target.node_address.is_empty() {
            return Err(Fault::ConfigIncomplete {
                field: "node_address",
            });
        }
        if identity.shared_secret.is_empty() {
            return Err(Fault::ConfigIncomplete {
                field: "shared_secret",
            });
        }
        if target.registered_process.is_empty() {
            return Err(Fault::ConfigIncomplete {
                field: "registered_process",
            });
        }

        let connect_deadline = Instant::now() + self.connect_timeout;
        let mut conn = tokio::time::timeout_at(
            connect_deadline,
            self.transport.connect(identity, target),
        )
        .await
        .map_err(|_| Fault::Timeout {
            stage: TimeoutStage::Connect,
        })??;

        let message = envelope::build(conn.token(), request.method_code, &request.uri);
        conn.send_to_registered(&target.registered_process, message)
            .await?;

        // Receive loop. Absent any frame this would wait forever, so the
        // whole wait is bounded by the reply deadline.
        let reply_deadline = Instant::now() + self.reply_timeout;
        loop {
            let frame = tokio::time::timeout_at(reply_deadline, conn.next_frame())
                .await
                .map_err(|_| Fault::Timeout {
                    stage: TimeoutStage::AwaitReply,
                })?;

            match frame {
                InboundFrame::Ping => {
                    tracing::trace!(token = %conn.token(), "Liveness ping absorbed");
                }
                InboundFrame::ProtocolError { detail } => {
                    return Err(Fault::Transport { reason: detail });
                }
                InboundFrame::Delivery(payload) => {
                    return reply::decode(&payload);
                }
            }
        }
    }
}
