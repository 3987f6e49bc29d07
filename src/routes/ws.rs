//! WebSocket endpoint for the real-time region channel.
//!
//! Clients connect to `GET /ws`, send `joinRegion` to subscribe, and from then
//! on receive every event published to that region. A `sensorData` frame is
//! relayed to the other members of the region named in its payload.
//!
//! The connection's subscriptions are removed exactly once, when the
//! socket loop exits for any reason.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::{debug, info, warn};

use crate::channel::ClientId;
use crate::error::Result;
use crate::events::{ClientEvent, SensorPayload, ServerEvent};
use crate::AppState;

// ---

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(upgrade))
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Pump events between one socket and the region channel until either side
/// goes away.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // ---
    let (client, mut events) = state.channel.connect().await;
    info!(client = %client, "New client connected");

    loop {
        tokio::select! {
            outbound = events.recv() => {
                let Some(event) = outbound else {
                    debug!(client = %client, "Event queue closed");
                    break;
                };
                let frame = match event.to_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("Failed to encode {} event: {e}", event.name());
                        continue;
                    }
                };
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    debug!(client = %client, "Send failed, closing");
                    break;
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = handle_client_frame(&state, client, text.as_str()).await {
                            debug!(client = %client, "Ignoring frame: {e}");
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(client = %client, "Pong failed, closing");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(client = %client, "WebSocket error: {e}");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary and pong frames carry nothing for us.
                    }
                }
            }
        }
    }

    let regions = state.channel.leave(client).await;
    info!(client = %client, regions, "Client disconnected");
}

async fn handle_client_frame(state: &AppState, client: ClientId, frame: &str) -> Result<()> {
    // ---
    match ClientEvent::parse(frame)? {
        ClientEvent::JoinRegion(region) => {
            state.channel.join(client, &region).await;
            info!(client = %client, "Client joined region: {region}");
        }
        ClientEvent::LeaveRegion(region) => {
            state.channel.leave_region(client, &region).await;
            info!(client = %client, "Client left region: {region}");
        }
        ClientEvent::SensorData(report) => {
            let region = report.region.clone();
            let event = ServerEvent::SensorUpdate(SensorPayload::Relayed(report));
            let delivered = state.channel.publish(&region, event, Some(client)).await;
            debug!(client = %client, region = %region, delivered, "Relayed sensor data");
        }
    }
    Ok(())
}
