//! Configuration subsystem: schema, loading, and validation.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BridgeConfig, ClusterConfig, HttpConfig, ListenerConfig, ObservabilityConfig, RouteConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
