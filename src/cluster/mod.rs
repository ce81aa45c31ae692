//! Cluster-side plumbing: identities, structured terms, wire frames, the
//! transport seam, and the TCP transport with its credential handshake.

pub mod frame;
pub mod handshake;
pub mod identity;
pub mod tcp;
pub mod term;
pub mod transport;

pub use frame::{InboundFrame, WireFrame};
pub use identity::{CorrelationToken, NodeIdentity, RemoteTarget};
pub use tcp::TcpClusterTransport;
pub use term::Term;
pub use transport::{ClusterConnection, ClusterTransport};
