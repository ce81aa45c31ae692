//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Higher priority wins; longer prefix breaks ties
//! - Path matching is case-sensitive, O(n) prefix scan
//! - Explicit None rather than silent default

use crate::config::schema::RouteConfig;

/// Compiled route table, ordered at construction so lookup is a first-match
/// scan.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteConfig>,
}

impl RouteTable {
    /// Compile the configured routes into lookup order.
    pub fn from_config(mut routes: Vec<RouteConfig>) -> Self {
        routes.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.path_prefix.len().cmp(&a.path_prefix.len()))
        });
        Self { routes }
    }

    /// Find the routing scope for a request path.
    pub fn match_path(&self, path: &str) -> Option<&RouteConfig> {
        self.routes
            .iter()
            .find(|route| path.starts_with(&route.path_prefix))
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
