//! Fault taxonomy for bridged calls.
//!
//! # Responsibilities
//! - Name every way a bridged call can fail
//! - Carry enough detail for the diagnostic stream
//! - Provide stable kind labels for logs and metrics
//!
//! # Design Decisions
//! - Every fault is terminal for its call; no variant is retryable
//! - Fault detail never crosses the HTTP boundary (callers see a generic
//!   500); detail is logged only
//! - `ConfigIncomplete` is raised before any network activity

use std::fmt;

/// A terminal failure of one bridged call.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// A required directive is missing from the matched route scope.
    /// Raised before any connection attempt.
    #[error("configuration incomplete: {field} is empty")]
    ConfigIncomplete {
        /// Name of the empty directive.
        field: &'static str,
    },

    /// The local cluster identity could not be established: unusable
    /// credential, local name rejected by the peer, or a failed credential
    /// exchange.
    #[error("cluster identity init failed: {reason}")]
    IdentityInit { reason: String },

    /// The transport connection to the remote node could not be opened.
    #[error("connect to {address} failed: {reason}")]
    Connect { address: String, reason: String },

    /// The connection failed mid-call while awaiting the reply.
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// A delivery frame arrived but its payload does not have the reply
    /// shape `(status: int, headers, body: bytes)`.
    #[error("malformed reply: {reason}")]
    MalformedReply { reason: String },

    /// A deadline expired. The stage records which wait was abandoned.
    #[error("timed out during {stage}")]
    Timeout { stage: TimeoutStage },
}

impl Fault {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::ConfigIncomplete { .. } => "config_incomplete",
            Fault::IdentityInit { .. } => "identity_init",
            Fault::Connect { .. } => "connect",
            Fault::Transport { .. } => "transport",
            Fault::MalformedReply { .. } => "malformed_reply",
            Fault::Timeout { .. } => "timeout",
        }
    }
}

/// Which wait a `Fault::Timeout` abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutStage {
    /// Opening the transport connection and running the handshake.
    Connect,
    /// Waiting for the correlated reply frame.
    AwaitReply,
}

impl fmt::Display for TimeoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutStage::Connect => write!(f, "connect"),
            TimeoutStage::AwaitReply => write!(f, "reply wait"),
        }
    }
}
