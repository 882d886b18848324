//! WebSocket route relaying inbound text through the [`Broadcaster`].

use axum::{
  Router,
  extract::{
    Path, State, WebSocketUpgrade,
    ws::{Message, WebSocket},
  },
  response::IntoResponse,
  routing::get,
};
use futures::{SinkExt, StreamExt};
use tracing::debug;

use crate::broadcaster::{Broadcaster, label_message};

/// Build the `/ws/{client_id}` router over `broadcaster`.
pub fn ws_router(broadcaster: Broadcaster) -> Router<()> {
  Router::new()
    .route("/ws/{client_id}", get(upgrade))
    .with_state(broadcaster)
}

/// WebSocket upgrade handler for `/ws/{client_id}`
async fn upgrade(
  ws: WebSocketUpgrade,
  Path(client_id): Path<i64>,
  State(broadcaster): State<Broadcaster>,
) -> impl IntoResponse {
  ws.on_upgrade(move |socket| handle_socket(socket, client_id, broadcaster))
}

/// Pump one connection until either side closes.
///
/// Outbound messages come from this connection's [`Subscription`]; a stalled
/// socket only stalls this task. The subscription is dropped on return, which
/// removes the connection from the set however the loop ended.
///
/// [`Subscription`]: crate::Subscription
async fn handle_socket(socket: WebSocket, client_id: i64, broadcaster: Broadcaster) {
  let (mut ws_sender, mut ws_receiver) = socket.split();
  let mut subscription = broadcaster.connect();
  let connection = subscription.id();

  debug!(%connection, client_id, "WebSocket client connected");

  loop {
    tokio::select! {
      outbound = subscription.recv() => {
        let Some(text) = outbound else { break };
        if ws_sender.send(Message::Text(text.into())).await.is_err() {
          debug!(%connection, "WebSocket send failed, client disconnected");
          break;
        }
      }

      inbound = ws_receiver.next() => {
        match inbound {
          Some(Ok(Message::Text(text))) => {
            broadcaster.broadcast(&label_message(client_id, text.as_str()));
          }
          Some(Ok(Message::Close(_))) | None => break,
          // Binary, ping and pong frames carry nothing to relay.
          Some(Ok(_)) => {}
          Some(Err(e)) => {
            debug!(%connection, error = %e, "WebSocket receive failed");
            break;
          }
        }
      }
    }
  }

  debug!(%connection, client_id, "WebSocket client disconnected");
}
