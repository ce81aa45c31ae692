//! End-to-end tests: the real TCP transport against a scripted worker
//! node, and the full HTTP server in front of both.

use std::sync::Arc;

use nodegate::bridge::{Bridge, BridgeRequest};
use nodegate::cluster::identity::{NodeIdentity, RemoteTarget};
use nodegate::cluster::term::Term;
use nodegate::cluster::TcpClusterTransport;
use nodegate::config::{BridgeConfig, RouteConfig, TimeoutConfig};
use nodegate::error::Fault;
use nodegate::HttpServer;

mod common;

fn timeouts() -> TimeoutConfig {
    TimeoutConfig {
        connect_secs: 2,
        reply_secs: 2,
        request_secs: 10,
    }
}

fn ok_reply(_envelope: &Term) -> Term {
    Term::tuple(vec![
        Term::Int(200),
        Term::List(vec![]),
        Term::binary(b"OK".to_vec()),
    ])
}

#[tokio::test]
async fn bridged_call_roundtrips_over_tcp() {
    let (addr, received) =
        common::spawn_worker_node("cookie123", "httpd_bridge", 0, ok_reply).await;

    let bridge = Bridge::new(Arc::new(TcpClusterTransport::new()), &timeouts());
    let identity = NodeIdentity::ephemeral("gate-e2e", "cookie123");
    let target = RemoteTarget {
        node_address: addr.to_string(),
        registered_process: "httpd_bridge".into(),
    };
    let request = BridgeRequest {
        method_code: 1,
        uri: "/status".into(),
    };

    let reply = bridge
        .invoke(&identity, &target, &request)
        .await
        .expect("bridged call");

    assert_eq!(reply.status, 200);
    assert_eq!(&reply.body[..], b"OK");

    // The worker saw exactly the envelope triple (token, 1, "/status").
    let envelopes = received.lock().unwrap();
    assert_eq!(envelopes.len(), 1);
    let items = envelopes[0].as_tuple().expect("tuple");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_tuple().map(|t| t.len()), Some(3));
    assert_eq!(items[1].as_int(), Some(1));
    assert_eq!(items[2].as_str(), Some("/status"));
}

#[tokio::test]
async fn pings_are_absorbed_over_tcp() {
    let (addr, _received) =
        common::spawn_worker_node("cookie123", "httpd_bridge", 10, ok_reply).await;

    let bridge = Bridge::new(Arc::new(TcpClusterTransport::new()), &timeouts());
    let identity = NodeIdentity::ephemeral("gate-e2e", "cookie123");
    let target = RemoteTarget {
        node_address: addr.to_string(),
        registered_process: "httpd_bridge".into(),
    };

    let reply = bridge
        .invoke(
            &identity,
            &target,
            &BridgeRequest {
                method_code: 1,
                uri: "/ping-storm".into(),
            },
        )
        .await
        .expect("bridged call despite pings");
    assert_eq!(reply.status, 200);
}

#[tokio::test]
async fn wrong_secret_fails_identity_init() {
    let (addr, _received) =
        common::spawn_worker_node("cookie123", "httpd_bridge", 0, ok_reply).await;

    let bridge = Bridge::new(Arc::new(TcpClusterTransport::new()), &timeouts());
    let identity = NodeIdentity::ephemeral("gate-e2e", "not-the-cookie");
    let target = RemoteTarget {
        node_address: addr.to_string(),
        registered_process: "httpd_bridge".into(),
    };

    let fault = bridge
        .invoke(
            &identity,
            &target,
            &BridgeRequest {
                method_code: 1,
                uri: "/".into(),
            },
        )
        .await
        .expect_err("must fail");
    assert!(matches!(fault, Fault::IdentityInit { .. }));
}

#[tokio::test]
async fn unreachable_node_fails_connect() {
    // Bind then drop to get an address nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let bridge = Bridge::new(Arc::new(TcpClusterTransport::new()), &timeouts());
    let identity = NodeIdentity::ephemeral("gate-e2e", "cookie123");
    let target = RemoteTarget {
        node_address: addr.to_string(),
        registered_process: "httpd_bridge".into(),
    };

    let fault = bridge
        .invoke(
            &identity,
            &target,
            &BridgeRequest {
                method_code: 1,
                uri: "/".into(),
            },
        )
        .await
        .expect_err("must fail");
    assert!(matches!(fault, Fault::Connect { .. }));
}

async fn spawn_gateway(config: BridgeConfig) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

fn gateway_config(node_addr: std::net::SocketAddr) -> BridgeConfig {
    BridgeConfig {
        routes: vec![RouteConfig {
            name: "workers".into(),
            path_prefix: "/".into(),
            priority: 0,
            node_address: node_addr.to_string(),
            shared_secret: "cookie123".into(),
            registered_process: "httpd_bridge".into(),
        }],
        timeouts: timeouts(),
        ..BridgeConfig::default()
    }
}

#[tokio::test]
async fn http_request_is_bridged_end_to_end() {
    let (node_addr, received) = common::spawn_worker_node("cookie123", "httpd_bridge", 1, |env| {
        // Echo the requested uri back in the body.
        let uri = env
            .as_tuple()
            .and_then(|items| items.get(2))
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .to_string();
        Term::tuple(vec![
            Term::Int(200),
            Term::List(vec![]),
            Term::binary(uri.into_bytes()),
        ])
    })
    .await;

    let gateway_addr = spawn_gateway(gateway_config(node_addr)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{gateway_addr}/status?verbose=1"))
        .send()
        .await
        .expect("gateway reachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/plain"
    );
    assert_eq!(res.text().await.unwrap(), "/status?verbose=1");

    let envelopes = received.lock().unwrap();
    assert_eq!(envelopes.len(), 1);
    let items = envelopes[0].as_tuple().expect("tuple");
    assert_eq!(items[1].as_int(), Some(1)); // GET
}

#[tokio::test]
async fn non_200_collapses_by_default_and_passes_through_when_enabled() {
    let not_found = |_env: &Term| {
        Term::tuple(vec![
            Term::Int(404),
            Term::List(vec![]),
            Term::binary(b"missing".to_vec()),
        ])
    };

    let (node_addr, _) =
        common::spawn_worker_node("cookie123", "httpd_bridge", 0, not_found).await;

    // Narrow default: 404 from the worker collapses to a generic 500.
    let narrow_addr = spawn_gateway(gateway_config(node_addr)).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{narrow_addr}/missing"))
        .send()
        .await
        .expect("gateway reachable");
    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "missing");

    // Opt-in passthrough preserves the worker status.
    let mut passthrough_config = gateway_config(node_addr);
    passthrough_config.http.status_passthrough = true;
    let passthrough_addr = spawn_gateway(passthrough_config).await;
    let res = client
        .get(format!("http://{passthrough_addr}/missing"))
        .send()
        .await
        .expect("gateway reachable");
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "missing");
}

#[tokio::test]
async fn unmatched_path_is_a_404_without_any_bridging() {
    let (node_addr, received) =
        common::spawn_worker_node("cookie123", "httpd_bridge", 0, ok_reply).await;

    let mut config = gateway_config(node_addr);
    config.routes[0].path_prefix = "/api".into();
    let gateway_addr = spawn_gateway(config).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{gateway_addr}/other"))
        .send()
        .await
        .expect("gateway reachable");

    assert_eq!(res.status(), 404);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn gateway_surfaces_faults_as_generic_500() {
    // Nothing listening at the routed node address.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway_addr = spawn_gateway(gateway_config(dead_addr)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{gateway_addr}/status"))
        .send()
        .await
        .expect("gateway reachable");

    assert_eq!(res.status(), 500);
    let body = res.text().await.unwrap();
    // Generic body only; no fault detail crosses the HTTP boundary.
    assert_eq!(body, "bridged call failed\n");
}
