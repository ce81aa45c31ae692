//! Credential handshake run after the transport connection opens.
//!
//! Sequence, client side first:
//!
//! ```text
//! -> Hello { name, version }
//! <- Challenge { nonce }            (or Reject)
//! -> Answer { digest, nonce }       digest = SHA-256(secret || nonce)
//! <- Welcome { digest }             (or Reject) mutual proof over our nonce
//! ```
//!
//! Both sides prove knowledge of the shared secret without sending it.
//! A refused name or a bad digest is a credential failure, distinct from
//! socket-level connect failures.

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::cluster::frame::{self, WireFrame, PROTOCOL_VERSION};
use crate::cluster::identity::NodeIdentity;

/// Failure modes of the credential exchange.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    /// Socket failed mid-exchange.
    #[error("handshake io: {0}")]
    Io(#[from] std::io::Error),

    /// The peer refused the session (name collision, unknown name, ...).
    #[error("peer rejected handshake: {reason}")]
    Rejected { reason: String },

    /// The peer's credential proof did not verify.
    #[error("peer presented a bad credential digest")]
    BadPeerDigest,

    /// The peer's credential proof of ours did not verify (server side).
    #[error("client presented a bad credential digest")]
    BadClientDigest,

    /// A frame arrived out of sequence.
    #[error("unexpected frame during handshake: {got}")]
    Unexpected { got: &'static str },
}

/// Proof digest: hex SHA-256 of the secret followed by the big-endian nonce.
pub fn challenge_digest(secret: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Read the next non-ping frame, failing on a ping.
///
/// Neither side sends liveness traffic until the session is established.
async fn expect_frame<S>(stream: &mut S) -> Result<WireFrame, HandshakeError>
where
    S: AsyncRead + Unpin,
{
    match frame::read_frame(stream).await? {
        Some(frame) => Ok(frame),
        None => Err(HandshakeError::Unexpected { got: "ping" }),
    }
}

/// Run the client side of the handshake.
pub async fn client<S>(stream: &mut S, identity: &NodeIdentity) -> Result<(), HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    frame::write_frame(
        stream,
        &WireFrame::Hello {
            name: identity.local_name.clone(),
            version: PROTOCOL_VERSION,
        },
    )
    .await?;

    let peer_nonce = match expect_frame(stream).await? {
        WireFrame::Challenge { nonce } => nonce,
        WireFrame::Reject { reason } => return Err(HandshakeError::Rejected { reason }),
        _ => return Err(HandshakeError::Unexpected { got: "non-challenge" }),
    };

    let our_nonce: u64 = rand::random();
    frame::write_frame(
        stream,
        &WireFrame::Answer {
            digest: challenge_digest(&identity.shared_secret, peer_nonce),
            nonce: our_nonce,
        },
    )
    .await?;

    match expect_frame(stream).await? {
        WireFrame::Welcome { digest } => {
            if digest != challenge_digest(&identity.shared_secret, our_nonce) {
                return Err(HandshakeError::BadPeerDigest);
            }
            Ok(())
        }
        WireFrame::Reject { reason } => Err(HandshakeError::Rejected { reason }),
        _ => Err(HandshakeError::Unexpected { got: "non-welcome" }),
    }
}

/// Run the server side of the handshake. Returns the peer's claimed name.
///
/// Used by in-process worker harnesses; a real node runtime implements the
/// same exchange.
pub async fn accept<S>(stream: &mut S, secret: &str) -> Result<String, HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let peer_name = match expect_frame(stream).await? {
        WireFrame::Hello { name, version } if version == PROTOCOL_VERSION => name,
        WireFrame::Hello { .. } => {
            let reject = WireFrame::Reject {
                reason: "unsupported protocol version".into(),
            };
            frame::write_frame(stream, &reject).await?;
            return Err(HandshakeError::Rejected {
                reason: "unsupported protocol version".into(),
            });
        }
        _ => return Err(HandshakeError::Unexpected { got: "non-hello" }),
    };

    let our_nonce: u64 = rand::random();
    frame::write_frame(stream, &WireFrame::Challenge { nonce: our_nonce }).await?;

    let peer_nonce = match expect_frame(stream).await? {
        WireFrame::Answer { digest, nonce } => {
            if digest != challenge_digest(secret, our_nonce) {
                let reject = WireFrame::Reject {
                    reason: "credential mismatch".into(),
                };
                frame::write_frame(stream, &reject).await?;
                return Err(HandshakeError::BadClientDigest);
            }
            nonce
        }
        _ => return Err(HandshakeError::Unexpected { got: "non-answer" }),
    };

    frame::write_frame(
        stream,
        &WireFrame::Welcome {
            digest: challenge_digest(secret, peer_nonce),
        },
    )
    .await?;

    Ok(peer_name)
}
