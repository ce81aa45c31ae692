//! Wire frames for the node-to-node connection.
//!
//! Frame format: `[length:4 BE][payload:N]`. A zero-length frame is a
//! liveness ping and carries no payload. Non-empty payloads are
//! serde-encoded [`WireFrame`] values; the structured-term marshalling
//! inside a delivery is the serializer's concern, not this module's.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::cluster::term::Term;

/// Handshake protocol revision carried in `Hello`.
pub const PROTOCOL_VERSION: u32 = 1;

/// Maximum payload size (1 MiB). Larger frames are rejected to prevent
/// memory exhaustion from a misbehaving peer.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Every non-ping frame the connection can carry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum WireFrame {
    /// Client opener: claimed participant name plus protocol revision.
    Hello { name: String, version: u32 },
    /// Server challenge nonce.
    Challenge { nonce: u64 },
    /// Client credential proof plus a counter-challenge.
    Answer { digest: String, nonce: u64 },
    /// Server credential proof; the connection is established after this.
    Welcome { digest: String },
    /// Terminal handshake refusal.
    Reject { reason: String },
    /// Message delivery to a registered name or a correlation token.
    Deliver { to: String, message: Term },
}

/// One inbound frame, classified for the receive loop.
#[derive(Debug)]
pub enum InboundFrame {
    /// Liveness keepalive. Never application data; absorbed silently.
    Ping,
    /// The connection is unusable. Terminal for the call.
    ProtocolError { detail: String },
    /// A message payload addressed to this caller.
    Delivery(Term),
}

/// Write one frame, length-prefixed.
pub async fn write_frame<W>(writer: &mut W, frame: &WireFrame) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let payload = serde_json::to_vec(frame)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    if payload.len() > MAX_FRAME_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame too large: {} bytes", payload.len()),
        ));
    }
    writer.write_all(&(payload.len() as u32).to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await
}

/// Write a liveness ping (an empty frame).
pub async fn write_ping<W>(writer: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&0u32.to_be_bytes()).await?;
    writer.flush().await
}

/// Read one frame. `Ok(None)` is a liveness ping.
pub async fn read_frame<R>(reader: &mut R) -> std::io::Result<Option<WireFrame>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf) as usize;

    if len == 0 {
        return Ok(None);
    }
    if len > MAX_FRAME_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame too large: {len} bytes"),
        ));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
