//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the bridge handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch requests to the routing table
//! - Run one bridged call per request and emit the mapped response
//!
//! # Design Decisions
//! - Each request mints its own ephemeral identity; concurrent requests
//!   share no cluster state
//! - Fault detail goes to the diagnostic stream only

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::time::Instant;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::bridge::{Bridge, BridgeRequest};
use crate::cluster::identity::{NodeIdentity, RemoteTarget};
use crate::cluster::transport::ClusterTransport;
use crate::cluster::TcpClusterTransport;
use crate::config::{BridgeConfig, ClusterConfig};
use crate::http::{request, response};
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub bridge: Arc<Bridge>,
    pub cluster: ClusterConfig,
    pub status_passthrough: bool,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
}

impl HttpServer {
    /// Create a server using the production TCP transport.
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_transport(config, Arc::new(TcpClusterTransport::new()))
    }

    /// Create a server over an explicit transport. Tests substitute
    /// scripted transports here.
    pub fn with_transport(config: BridgeConfig, transport: Arc<dyn ClusterTransport>) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(config.routes.clone())),
            bridge: Arc::new(Bridge::new(transport, &config.timeouts)),
            cluster: config.cluster.clone(),
            status_passthrough: config.http.status_passthrough,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(bridge_handler))
            .route("/", any(bridge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server in-process without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

/// Main bridge handler: match a route, run one bridged call, map the
/// outcome.
async fn bridge_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        metrics::record_bridge_call("none", "no_route", start_time);
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    let bridge_request = BridgeRequest {
        method_code: request::method_code(&method),
        uri: request::bridge_uri(request.uri()),
    };
    let identity = NodeIdentity::ephemeral(
        &state.cluster.local_name_prefix,
        route.shared_secret.clone(),
    );
    let target = RemoteTarget {
        node_address: route.node_address.clone(),
        registered_process: route.registered_process.clone(),
    };

    tracing::debug!(
        request_id = %request_id,
        route = %route.name,
        method = %method,
        uri = %bridge_request.uri,
        node_address = %target.node_address,
        "Bridging request"
    );

    match state.bridge.invoke(&identity, &target, &bridge_request).await {
        Ok(reply) => {
            metrics::record_bridge_call(&route.name, "ok", start_time);
            response::reply_response(reply, state.status_passthrough)
        }
        Err(fault) => {
            tracing::error!(
                request_id = %request_id,
                route = %route.name,
                fault = fault.kind(),
                error = %fault,
                "Bridged call failed"
            );
            metrics::record_bridge_call(&route.name, fault.kind(), start_time);
            response::fault_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
