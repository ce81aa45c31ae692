//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the three required directives per routing scope
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the bridge re-checks
//!   the required directives at call time as a last line of defense

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::BridgeConfig;

/// One semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener bind_address {address:?} is not a socket address")]
    InvalidBindAddress { address: String },

    #[error("no routes configured")]
    NoRoutes,

    #[error("route {route:?}: {field} not specified")]
    EmptyDirective { route: String, field: &'static str },

    #[error("route {route:?}: path_prefix must start with '/'")]
    InvalidPathPrefix { route: String },

    #[error("duplicate route name {route:?}")]
    DuplicateRouteName { route: String },

    #[error("timeouts.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen_names = HashSet::new();
    for route in &config.routes {
        if !seen_names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                route: route.name.clone(),
            });
        }
        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPathPrefix {
                route: route.name.clone(),
            });
        }
        for (field, value) in [
            ("node_address", &route.node_address),
            ("shared_secret", &route.shared_secret),
            ("registered_process", &route.registered_process),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::EmptyDirective {
                    route: route.name.clone(),
                    field,
                });
            }
        }
    }

    for (field, value) in [
        ("connect_secs", config.timeouts.connect_secs),
        ("reply_secs", config.timeouts.reply_secs),
        ("request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
