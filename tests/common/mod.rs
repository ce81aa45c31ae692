//! Shared utilities for integration testing: a scripted transport double
//! and a scripted TCP worker node speaking the real frame protocol.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use nodegate::cluster::frame::{self, InboundFrame, WireFrame};
use nodegate::cluster::handshake;
use nodegate::cluster::identity::{CorrelationToken, NodeIdentity, RemoteTarget};
use nodegate::cluster::term::Term;
use nodegate::cluster::transport::{ClusterConnection, ClusterTransport};
use nodegate::error::Fault;

/// How a scripted transport answers connection attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectBehavior {
    Accept,
    Refuse,
    RejectIdentity,
}

/// Scripted transport: counts connection attempts, records sent envelopes,
/// and serves a fixed frame script. An exhausted script never resolves,
/// which is how a silent remote is modeled.
pub struct MockTransport {
    behavior: ConnectBehavior,
    frames: Arc<Mutex<VecDeque<InboundFrame>>>,
    connect_attempts: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<(String, Term)>>>,
}

impl MockTransport {
    pub fn scripted(frames: Vec<InboundFrame>) -> Self {
        Self {
            behavior: ConnectBehavior::Accept,
            frames: Arc::new(Mutex::new(frames.into())),
            connect_attempts: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn refusing() -> Self {
        let mut transport = Self::scripted(Vec::new());
        transport.behavior = ConnectBehavior::Refuse;
        transport
    }

    pub fn rejecting_identity() -> Self {
        let mut transport = Self::scripted(Vec::new());
        transport.behavior = ConnectBehavior::RejectIdentity;
        transport
    }

    /// Delivery of a well-formed `(status, headers, body)` reply.
    pub fn reply_frame(status: i64, body: &[u8]) -> InboundFrame {
        InboundFrame::Delivery(Term::tuple(vec![
            Term::Int(status),
            Term::List(vec![]),
            Term::binary(body.to_vec()),
        ]))
    }

    pub fn connect_attempts(&self) -> usize {
        self.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(String, Term)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterTransport for MockTransport {
    async fn connect(
        &self,
        identity: &NodeIdentity,
        target: &RemoteTarget,
    ) -> Result<Box<dyn ClusterConnection>, Fault> {
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            ConnectBehavior::Refuse => Err(Fault::Connect {
                address: target.node_address.clone(),
                reason: "connection refused".into(),
            }),
            ConnectBehavior::RejectIdentity => Err(Fault::IdentityInit {
                reason: "peer rejected handshake: name collision".into(),
            }),
            ConnectBehavior::Accept => Ok(Box::new(MockConnection {
                token: CorrelationToken::mint(&identity.local_name),
                frames: Arc::clone(&self.frames),
                sent: Arc::clone(&self.sent),
            })),
        }
    }
}

struct MockConnection {
    token: CorrelationToken,
    frames: Arc<Mutex<VecDeque<InboundFrame>>>,
    sent: Arc<Mutex<Vec<(String, Term)>>>,
}

#[async_trait]
impl ClusterConnection for MockConnection {
    fn token(&self) -> &CorrelationToken {
        &self.token
    }

    async fn send_to_registered(&mut self, process: &str, message: Term) -> Result<(), Fault> {
        self.sent.lock().unwrap().push((process.to_string(), message));
        Ok(())
    }

    async fn next_frame(&mut self) -> InboundFrame {
        let next = self.frames.lock().unwrap().pop_front();
        match next {
            Some(frame) => frame,
            // Script exhausted: the remote has gone silent.
            None => std::future::pending().await,
        }
    }
}

/// Start a scripted worker node on an ephemeral port.
///
/// For every connection it runs the server side of the handshake, expects a
/// delivery to `registered_process`, emits `pings_before_reply` liveness
/// pings, and answers with `reply(envelope)` addressed at the envelope's
/// token. Returns the node address and the envelopes it received.
pub async fn spawn_worker_node<F>(
    secret: &'static str,
    registered_process: &'static str,
    pings_before_reply: usize,
    reply: F,
) -> (SocketAddr, Arc<Mutex<Vec<Term>>>)
where
    F: Fn(&Term) -> Term + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind worker node");
    let addr = listener.local_addr().expect("local addr");

    let received = Arc::new(Mutex::new(Vec::new()));
    let received_handle = Arc::clone(&received);
    let reply = Arc::new(reply);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let received = Arc::clone(&received_handle);
            let reply = Arc::clone(&reply);

            tokio::spawn(async move {
                if handshake::accept(&mut socket, secret).await.is_err() {
                    return;
                }

                let envelope = match frame::read_frame(&mut socket).await {
                    Ok(Some(WireFrame::Deliver { to, message })) if to == registered_process => {
                        message
                    }
                    _ => return,
                };
                received.lock().unwrap().push(envelope.clone());

                for _ in 0..pings_before_reply {
                    if frame::write_ping(&mut socket).await.is_err() {
                        return;
                    }
                }

                let token = envelope
                    .as_tuple()
                    .and_then(|items| items.first())
                    .and_then(|t| serde_json::to_string(t).ok())
                    .unwrap_or_default();
                let deliver = WireFrame::Deliver {
                    to: token,
                    message: reply(&envelope),
                };
                let _ = frame::write_frame(&mut socket, &deliver).await;
            });
        }
    });

    (addr, received)
}
