//! Client identity and reply correlation.
//!
//! # Responsibilities
//! - Mint ephemeral per-call node identities that can never collide
//! - Carry the remote target a route points at
//! - Mint correlation tokens the remote side addresses replies to
//!
//! # Design Decisions
//! - Identities are explicit values scoped to one call, never a hidden
//!   process-wide singleton
//! - The sender identity IS the correlation key; there is no separate
//!   request-id field on the wire

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cluster::term::Term;

/// Serial source for correlation tokens. Relaxed ordering is sufficient
/// since only uniqueness matters.
static CONNECTION_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Ephemeral client identity used to join the cluster for one bridged call.
#[derive(Debug, Clone)]
pub struct NodeIdentity {
    /// Local participant name claimed on the cluster.
    pub local_name: String,
    /// Cluster-join credential.
    pub shared_secret: String,
}

impl NodeIdentity {
    /// Mint an identity with a unique local name.
    ///
    /// Concurrent calls each get their own name, so they cannot race to
    /// claim the same participant name on the cluster.
    pub fn ephemeral(prefix: &str, shared_secret: impl Into<String>) -> Self {
        Self {
            local_name: format!("{}-{}", prefix, uuid::Uuid::new_v4().simple()),
            shared_secret: shared_secret.into(),
        }
    }
}

/// The remote side of a bridged call, supplied by the matched route.
#[derive(Debug, Clone)]
pub struct RemoteTarget {
    /// Dialable address of the remote node.
    pub node_address: String,
    /// Name the worker process is registered under on that node.
    pub registered_process: String,
}

/// Opaque self-identifier embedded in the outbound envelope so the worker
/// can address its reply back at this caller.
///
/// Valid only for frames exchanged over the connection it was minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationToken {
    /// Local participant name.
    pub node: String,
    /// Per-connection serial.
    pub serial: u64,
    /// Creation epoch, in seconds.
    pub creation: u64,
}

impl CorrelationToken {
    /// Mint a token for a freshly established connection.
    pub fn mint(local_name: &str) -> Self {
        let creation = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            node: local_name.to_string(),
            serial: CONNECTION_SERIAL.fetch_add(1, Ordering::Relaxed),
            creation,
        }
    }

    /// Term form embedded in the outbound envelope.
    pub fn to_term(&self) -> Term {
        Term::tuple(vec![
            Term::Str(self.node.clone()),
            Term::Int(self.serial as i64),
            Term::Int(self.creation as i64),
        ])
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}.{}", self.node, self.serial, self.creation)
    }
}
