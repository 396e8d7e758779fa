//! HTTP-level tests for the client and the Grid/Node handles.

use futures::StreamExt;
use hashgrid::{
    ClientConfig, Grid, GridInfo, Hashgrid, HashgridError, Message, NewNode, NodeUpdate,
    SessionState,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tokio_test::{assert_err, assert_ok};

fn config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::default()
        .with_api_key("x")
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5))
}

async fn mock_grid(server: &mut ServerGuard, tick: u64) -> mockito::Mock {
    server
        .mock("GET", "/api/v1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"name": "g1", "tick": tick}).to_string())
        .create_async()
        .await
}

const NODES: &str = r#"[
    {"node_id":"n1","owner_id":"u1","name":"echo","message":"I echo","capacity":10},
    {"node_id":"n2","owner_id":"u1","name":"mirror","message":"I mirror","capacity":5}
]"#;

#[tokio::test]
async fn test_connect_returns_grid() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1")
        .match_header("authorization", "Bearer x")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"g1","tick":5}"#)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    assert_eq!(grid.name(), "g1");
    assert_eq!(grid.tick(), 5);
    assert_eq!(grid.client().state(), SessionState::Open);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connect_without_key_sends_no_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"name":"open","tick":0}"#)
        .create_async()
        .await;

    let config = ClientConfig::default().with_base_url(server.url());
    let grid = assert_ok!(Hashgrid::connect(config).await);
    assert_eq!(grid.name(), "open");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connect_with_bad_key_is_authentication_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1")
        .with_status(401)
        .with_body(r#"{"message":"invalid token"}"#)
        .create_async()
        .await;

    let err = Hashgrid::connect(config(&server)).await.unwrap_err();
    assert!(matches!(err, HashgridError::Authentication { status: 401, .. }));
    assert_eq!(err.status_code(), Some(401));
    assert!(err.response().unwrap().text().contains("invalid token"));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
    let err = Hashgrid::connect(config).await.unwrap_err();
    assert!(matches!(err, HashgridError::Request(_)));
    assert!(err.is_api_error());
    assert!(err.to_string().starts_with("Request failed:"));
}

/// Mock whose body only arrives after `delay`.
async fn mock_slow_grid(server: &mut ServerGuard, delay: Duration) -> mockito::Mock {
    server
        .mock("GET", "/api/v1")
        .with_status(200)
        .with_chunked_body(move |w| {
            std::thread::sleep(delay);
            w.write_all(br#"{"name":"g1","tick":9}"#)
        })
        .create_async()
        .await
}

#[tokio::test]
async fn test_request_timeout_is_request_error() {
    let mut server = Server::new_async().await;
    mock_slow_grid(&mut server, Duration::from_secs(2)).await;

    let client = Hashgrid::new(config(&server).with_timeout(Duration::from_millis(200)));
    client.open().unwrap();
    let started = Instant::now();
    let err = client.grids().get().await.unwrap_err();
    assert!(matches!(err, HashgridError::Request(_)));
    assert!(err.is_api_error());
    assert_eq!(err.status_code(), None);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    let mut server = Server::new_async().await;
    mock_slow_grid(&mut server, Duration::from_secs(3)).await;

    let client = Hashgrid::new(config(&server));
    client.open().unwrap();
    let mut grid = Grid::new(
        GridInfo {
            name: "g1".into(),
            tick: 0,
        },
        client,
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let ticks: Vec<u64> = grid
        .listen_until(Duration::from_millis(10), cancel)
        .collect()
        .await;
    assert!(ticks.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(grid.tick(), 0);
}

#[tokio::test]
async fn test_non_json_success_body_becomes_content() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("ok")
        .create_async()
        .await;

    let client = Hashgrid::new(config(&server));
    client.open().unwrap();
    let value = client
        .request(reqwest::Method::GET, "/health", &[], None)
        .await
        .unwrap();
    assert_eq!(value, json!({"content": "ok"}));
}

#[tokio::test]
async fn test_session_guard_closes_client() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;

    let client = Hashgrid::new(config(&server));
    {
        let session = assert_ok!(client.session());
        let info = session.grids().get().await.unwrap();
        assert_eq!(info.tick, 1);
    }
    assert_eq!(client.state(), SessionState::Closed);
    assert_err!(client.grids().get().await);
}

#[tokio::test]
async fn test_nodes_yields_bound_nodes() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    let nodes_mock = server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .expect(2)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let nodes: Vec<_> = grid.nodes().collect().await;
    assert_eq!(nodes.len(), 2);
    let first = nodes[0].as_ref().unwrap();
    assert_eq!(first.node_id(), "n1");
    assert_eq!(first.capacity(), 10);

    // Restartable: every call fetches again.
    let again = grid.list_nodes().await.unwrap();
    assert_eq!(again[1].name(), "mirror");
    nodes_mock.assert_async().await;
}

#[tokio::test]
async fn test_recv_maps_null_score() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/node/n1/recv")
        .with_status(200)
        .with_body(r#"[{"peer_id":"p1","message":"hi","score":null}]"#)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let node = grid.list_nodes().await.unwrap().remove(0);
    let messages = node.recv().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].peer_id, "p1");
    assert_eq!(messages[0].message, "hi");
    assert_eq!(messages[0].score, None);
}

#[tokio::test]
async fn test_recv_empty_body_is_empty_list() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/node/n2/recv")
        .with_status(200)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let node = grid.list_nodes().await.unwrap().remove(1);
    assert!(node.recv().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_posts_scored_reply() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .create_async()
        .await;
    let send = server
        .mock("POST", "/api/v1/node/n1/send")
        .match_body(Matcher::Json(json!([
            {"peer_id": "p1", "message": "ok", "score": 0.9}
        ])))
        .with_status(200)
        .with_body(r#"[{"peer_id":"p1","success":true}]"#)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let node = grid.list_nodes().await.unwrap().remove(0);
    let statuses = node
        .send(&[Message::new("p1", "ok").with_score(0.9)])
        .await
        .unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].peer_id, "p1");
    assert!(statuses[0].success);
    send.assert_async().await;
}

#[tokio::test]
async fn test_send_omits_missing_score() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .create_async()
        .await;
    let send = server
        .mock("POST", "/api/v1/node/n1/send")
        .match_body(Matcher::Json(json!([
            {"peer_id": "p2", "message": "no score"},
            {"peer_id": "p1", "message": "zero", "score": 0.0}
        ])))
        .with_status(200)
        .with_body(r#"[{"peer_id":"p1","success":true},{"peer_id":"p2","success":false}]"#)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let node = grid.list_nodes().await.unwrap().remove(0);
    let statuses = node
        .send(&[
            Message::new("p2", "no score"),
            Message::new("p1", "zero").with_score(0.0),
        ])
        .await
        .unwrap();
    let by_peer = hashgrid::statuses_by_peer(&statuses);
    assert_eq!(by_peer["p1"], true);
    assert_eq!(by_peer["p2"], false);
    send.assert_async().await;
}

#[tokio::test]
async fn test_send_validation_error_uses_message() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    server
        .mock("GET", "/api/v1/node")
        .with_status(200)
        .with_body(NODES)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/node/n1/send")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"score must be between 0 and 1"}"#)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let node = grid.list_nodes().await.unwrap().remove(0);
    let err = node
        .send(&[Message::new("p1", "x").with_score(3.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, HashgridError::Validation { status: 422, .. }));
    assert_eq!(err.to_string(), "score must be between 0 and 1");
}

#[tokio::test]
async fn test_create_update_delete_node() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;
    let create = server
        .mock("POST", "/api/v1/node")
        .match_body(Matcher::Json(json!({"name": "echo", "message": "", "capacity": 100})))
        .with_status(201)
        .with_body(r#"{"node_id":"n9","owner_id":"u1","name":"echo","message":"","capacity":100}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/v1/node/n9")
        .match_body(Matcher::Json(json!({"capacity": 3})))
        .with_status(200)
        .with_body(r#"{"node_id":"n9","owner_id":"u1","name":"echo","message":"","capacity":3}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v1/node/n9")
        .with_status(204)
        .create_async()
        .await;

    let grid = Hashgrid::connect(config(&server)).await.unwrap();
    let mut node = grid.create_node(&NewNode::new("echo")).await.unwrap();
    assert_eq!(node.node_id(), "n9");

    node.update(NodeUpdate::default()).await.unwrap();
    node.update(NodeUpdate {
        capacity: Some(3),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(node.capacity(), 3);

    node.delete().await.unwrap();
    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_listen_yields_changed_ticks_only() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/api/v1")
        .with_status(200)
        .with_body(r#"{"name":"g1","tick":5}"#)
        .expect_at_least(2)
        .create_async()
        .await;

    let mut grid = Hashgrid::connect(config(&server)).await.unwrap();
    {
        let mut ticks = grid.listen(Duration::from_millis(10));
        assert_eq!(ticks.next().await, Some(5));

        // Unchanged tick: nothing is yielded while the server stays at 5.
        let idle = tokio::time::timeout(Duration::from_millis(100), ticks.next()).await;
        assert!(idle.is_err());
        first.assert_async().await;
        first.remove_async().await;

        server
            .mock("GET", "/api/v1")
            .with_status(200)
            .with_body(r#"{"name":"g1-renamed","tick":6}"#)
            .create_async()
            .await;
        let next = tokio::time::timeout(Duration::from_secs(5), ticks.next()).await;
        assert_eq!(next.unwrap(), Some(6));
    }
    assert_eq!(grid.tick(), 6);
    assert_eq!(grid.name(), "g1-renamed");
}

#[tokio::test]
async fn test_listen_survives_server_errors() {
    let mut server = Server::new_async().await;
    let ok = mock_grid(&mut server, 1).await;

    let mut grid = Hashgrid::connect(config(&server)).await.unwrap();
    let mut ticks = grid.listen(Duration::from_millis(10));
    assert_eq!(ticks.next().await, Some(1));

    ok.remove_async().await;
    let failing = server
        .mock("GET", "/api/v1")
        .with_status(503)
        .expect_at_least(1)
        .create_async()
        .await;
    // Failures are absorbed: the stream neither ends nor yields.
    let during_outage = tokio::time::timeout(Duration::from_millis(100), ticks.next()).await;
    assert!(during_outage.is_err());
    failing.assert_async().await;
    failing.remove_async().await;
    mock_grid(&mut server, 2).await;

    let next = tokio::time::timeout(Duration::from_secs(5), ticks.next()).await;
    assert_eq!(next.unwrap(), Some(2));
}

#[tokio::test]
async fn test_listen_stops_when_client_closed() {
    let mut server = Server::new_async().await;
    mock_grid(&mut server, 1).await;

    let mut grid = Hashgrid::connect(config(&server)).await.unwrap();
    let client = grid.client().clone();
    let mut ticks = grid.listen(Duration::from_millis(10));
    assert_eq!(ticks.next().await, Some(1));
    client.close();
    let end = tokio::time::timeout(Duration::from_secs(5), ticks.next()).await;
    assert_eq!(end.unwrap(), None);
}
