//! Outbound request envelope.
//!
//! The envelope is the ordered triple `(token, method_code, uri)`. The
//! correlation token rides in the first position so the worker can address
//! its reply without a separate request-id field.

use crate::cluster::identity::CorrelationToken;
use crate::cluster::term::Term;

/// Build the envelope for one bridged call.
///
/// Only called with an established connection's token; the triple is
/// immutable once sent.
pub fn build(token: &CorrelationToken, method_code: i64, uri: &str) -> Term {
    Term::tuple(vec![
        token.to_term(),
        Term::Int(method_code),
        Term::Str(uri.to_string()),
    ])
}
