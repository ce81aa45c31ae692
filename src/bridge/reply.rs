//! Reply decoding.
//!
//! # Responsibilities
//! - Extract status and body from a delivery payload
//! - Never trust wire shape: every structural deviation is an explicit
//!   malformed-reply fault, not undefined extraction
//!
//! # Design Decisions
//! - Exact arity of three: `(status, headers, body)`
//! - Status must be an integer in 100..=599
//! - Body must be a byte sequence; a string body is accepted and taken as
//!   its UTF-8 bytes
//! - The headers element is read and discarded; headers do not cross the
//!   bridge

use bytes::Bytes;

use crate::cluster::term::Term;
use crate::error::Fault;

/// A decoded worker reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTuple {
    /// Status code as replied by the worker.
    pub status: i64,
    /// Response body, passed through unmodified.
    pub body: Bytes,
}

/// Decode a delivery payload into a reply.
pub fn decode(payload: &Term) -> Result<ReplyTuple, Fault> {
    let items = payload.as_tuple().ok_or_else(|| Fault::MalformedReply {
        reason: format!("payload is a {}, expected a tuple", payload.type_name()),
    })?;

    if items.len() != 3 {
        return Err(Fault::MalformedReply {
            reason: format!("wrong arity: {} elements, expected 3", items.len()),
        });
    }

    let status = items[0].as_int().ok_or_else(|| Fault::MalformedReply {
        reason: format!(
            "status is a {}, expected an integer",
            items[0].type_name()
        ),
    })?;
    if !(100..=599).contains(&status) {
        return Err(Fault::MalformedReply {
            reason: format!("status {status} out of range"),
        });
    }

    let _headers = &items[1];

    let body = match &items[2] {
        Term::Bytes(bytes) => Bytes::from(bytes.clone()),
        Term::Str(s) => Bytes::from(s.clone().into_bytes()),
        other => {
            return Err(Fault::MalformedReply {
                reason: format!("body is a {}, expected bytes", other.type_name()),
            });
        }
    };

    Ok(ReplyTuple { status, body })
}
