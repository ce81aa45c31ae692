//! Production transport: framed messaging over a TCP connection.

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::cluster::frame::{self, InboundFrame, WireFrame};
use crate::cluster::handshake::{self, HandshakeError};
use crate::cluster::identity::{CorrelationToken, NodeIdentity, RemoteTarget};
use crate::cluster::term::Term;
use crate::cluster::transport::{ClusterConnection, ClusterTransport};
use crate::error::Fault;

/// Connects to remote nodes over TCP and runs the credential handshake.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpClusterTransport;

impl TcpClusterTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClusterTransport for TcpClusterTransport {
    async fn connect(
        &self,
        identity: &NodeIdentity,
        target: &RemoteTarget,
    ) -> Result<Box<dyn ClusterConnection>, Fault> {
        let mut stream =
            TcpStream::connect(target.node_address.as_str())
                .await
                .map_err(|e| Fault::Connect {
                    address: target.node_address.clone(),
                    reason: e.to_string(),
                })?;

        handshake::client(&mut stream, identity)
            .await
            .map_err(|e| match e {
                HandshakeError::Io(io) => Fault::Connect {
                    address: target.node_address.clone(),
                    reason: io.to_string(),
                },
                other => Fault::IdentityInit {
                    reason: other.to_string(),
                },
            })?;

        let token = CorrelationToken::mint(&identity.local_name);
        tracing::debug!(
            node_address = %target.node_address,
            token = %token,
            "Cluster connection established"
        );

        Ok(Box::new(TcpClusterConnection { stream, token }))
    }
}

/// One established node connection plus the token minted for it.
struct TcpClusterConnection {
    stream: TcpStream,
    token: CorrelationToken,
}

#[async_trait]
impl ClusterConnection for TcpClusterConnection {
    fn token(&self) -> &CorrelationToken {
        &self.token
    }

    async fn send_to_registered(&mut self, process: &str, message: Term) -> Result<(), Fault> {
        let deliver = WireFrame::Deliver {
            to: process.to_string(),
            message,
        };
        frame::write_frame(&mut self.stream, &deliver)
            .await
            .map_err(|e| Fault::Transport {
                reason: format!("send to {process}: {e}"),
            })
    }

    async fn next_frame(&mut self) -> InboundFrame {
        match frame::read_frame(&mut self.stream).await {
            Ok(None) => InboundFrame::Ping,
            Ok(Some(WireFrame::Deliver { message, .. })) => InboundFrame::Delivery(message),
            Ok(Some(other)) => InboundFrame::ProtocolError {
                detail: format!("unexpected frame on established connection: {other:?}"),
            },
            Err(e) => InboundFrame::ProtocolError {
                detail: e.to_string(),
            },
        }
    }
}
