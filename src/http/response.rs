//! Outcome-to-response mapping.
//!
//! # Responsibilities
//! - Map a decoded worker reply to an HTTP response
//! - Map faults to the generic server error
//!
//! # Design Decisions
//! - Content type is always text/plain
//! - Default mapping is deliberately narrow: worker status 200 becomes HTTP
//!   200, everything else collapses to 500; status passthrough is an
//!   explicit opt-in mode
//! - Reply body bytes pass through unmodified in both modes
//! - No fault detail crosses the HTTP boundary; callers get a fixed body

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};

use crate::bridge::ReplyTuple;

const CONTENT_TYPE: &str = "text/plain";
const FAULT_BODY: &str = "bridged call failed\n";

fn plain_text(status: StatusCode, body: Body) -> Response<Body> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    response
}

/// Map a decoded worker reply to an HTTP response.
pub fn reply_response(reply: ReplyTuple, status_passthrough: bool) -> Response<Body> {
    let status = if status_passthrough {
        u16::try_from(reply.status)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    } else if reply.status == 200 {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    plain_text(status, Body::from(reply.body))
}

/// The generic server error every fault maps to.
pub fn fault_response() -> Response<Body> {
    plain_text(
        StatusCode::INTERNAL_SERVER_ERROR,
        Body::from(FAULT_BODY),
    )
}
