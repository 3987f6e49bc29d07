//! Live tests for the real-time region channel.
//!
//! Each test binds the full service on an ephemeral port and talks to it
//! with a real WebSocket client. The global ticker is not spawned; ticks
//! are driven explicitly with `ticker::run_tick` so results are deterministic.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use resilience_hub::{router, ticker, AppState, Config};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const QUIET: Duration = Duration::from_millis(300);

async fn spawn_server() -> Result<(SocketAddr, Arc<AppState>)> {
    // ---
    let state = Arc::new(AppState::new(Config::default()));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(Arc::clone(&state));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((addr, state))
}

async fn connect(addr: SocketAddr) -> Result<Socket> {
    let (socket, _) = connect_async(format!("ws://{addr}/ws")).await?;
    Ok(socket)
}

async fn send(socket: &mut Socket, frame: Value) -> Result<()> {
    socket.send(Message::text(frame.to_string())).await?;
    Ok(())
}

/// Poll until `region` has exactly `count` members.
async fn wait_for_members(state: &AppState, region: &str, count: usize) {
    // ---
    for _ in 0..200 {
        if state.channel.members(region).await.len() == count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("region {region} never reached {count} members");
}

/// Collect text frames until the socket stays quiet for [`QUIET`].
async fn drain(socket: &mut Socket) -> Vec<Value> {
    // ---
    let mut frames = Vec::new();
    while let Ok(Some(Ok(msg))) = tokio::time::timeout(QUIET, socket.next()).await {
        if let Message::Text(text) = msg {
            if let Ok(value) = serde_json::from_str(text.as_str()) {
                frames.push(value);
            }
        }
    }
    frames
}

fn of_kind<'a>(frames: &'a [Value], kind: &str) -> Vec<&'a Value> {
    frames.iter().filter(|f| f["kind"] == kind).collect()
}

#[tokio::test]
async fn health_over_http() -> Result<()> {
    // ---
    let (addr, _state) = spawn_server().await?;
    let body: Value = Client::new()
        .get(format!("http://{addr}/api/health"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn joined_client_gets_one_update_per_sensor() -> Result<()> {
    // ---
    let (addr, state) = spawn_server().await?;
    let mut joined = connect(addr).await?;
    let mut idle = connect(addr).await?;

    send(&mut joined, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    wait_for_members(&state, "durban", 1).await;

    let report = ticker::run_tick(&state, &mut StdRng::seed_from_u64(3)).await;
    assert_eq!(report.sensor_updates, 4);

    let frames = drain(&mut joined).await;
    let mut ids: Vec<i64> = of_kind(&frames, "sensorUpdate")
        .iter()
        .filter_map(|f| f["data"]["id"].as_i64())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    for update in of_kind(&frames, "sensorUpdate") {
        let value = update["data"]["currentValue"].as_f64().unwrap_or(-1.0);
        assert!(value >= 0.0);
        assert!(update["data"]["foodSecurityRisk"].is_string());
    }

    assert!(drain(&mut idle).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn sensor_data_is_relayed_to_region_peers_only() -> Result<()> {
    // ---
    let (addr, state) = spawn_server().await?;
    let mut sender = connect(addr).await?;
    let mut peer = connect(addr).await?;
    let mut elsewhere = connect(addr).await?;

    send(&mut sender, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    send(&mut peer, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    send(&mut elsewhere, json!({ "kind": "joinRegion", "data": "cape-town" })).await?;
    wait_for_members(&state, "durban", 2).await;
    wait_for_members(&state, "cape-town", 1).await;

    let report = json!({ "region": "durban", "id": 7, "currentValue": 1.5 });
    send(&mut sender, json!({ "kind": "sensorData", "data": report })).await?;

    let frames = drain(&mut peer).await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["kind"], "sensorUpdate");
    assert_eq!(frames[0]["data"], report);

    assert!(drain(&mut sender).await.is_empty());
    assert!(drain(&mut elsewhere).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn disconnect_clears_subscriptions() -> Result<()> {
    // ---
    let (addr, state) = spawn_server().await?;
    let mut client = connect(addr).await?;

    send(&mut client, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    send(&mut client, json!({ "kind": "joinRegion", "data": "cape-town" })).await?;
    wait_for_members(&state, "cape-town", 1).await;

    client.close(None).await?;
    wait_for_members(&state, "durban", 0).await;
    wait_for_members(&state, "cape-town", 0).await;

    let report = ticker::run_tick(&state, &mut StdRng::seed_from_u64(4)).await;
    assert_eq!(report.deliveries, 0);
    assert_eq!(state.channel.stats().await.clients, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_frames_do_not_close_the_connection() -> Result<()> {
    // ---
    let (addr, state) = spawn_server().await?;
    let mut client = connect(addr).await?;

    client.send(Message::text("not json")).await?;
    send(&mut client, json!({ "kind": "reportIncident", "data": {} })).await?;
    send(&mut client, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    wait_for_members(&state, "durban", 1).await;

    ticker::run_tick(&state, &mut StdRng::seed_from_u64(5)).await;
    let frames = drain(&mut client).await;
    assert_eq!(of_kind(&frames, "sensorUpdate").len(), 4);
    Ok(())
}

#[tokio::test]
async fn leave_region_stops_delivery() -> Result<()> {
    // ---
    let (addr, state) = spawn_server().await?;
    let mut client = connect(addr).await?;

    send(&mut client, json!({ "kind": "joinRegion", "data": "durban" })).await?;
    wait_for_members(&state, "durban", 1).await;
    send(&mut client, json!({ "kind": "leaveRegion", "data": "durban" })).await?;
    wait_for_members(&state, "durban", 0).await;

    ticker::run_tick(&state, &mut StdRng::seed_from_u64(6)).await;
    assert!(drain(&mut client).await.is_empty());
    Ok(())
}
