//! The shared set of open connections and fan-out over it.

use std::{collections::HashMap, fmt, sync::Arc};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Identity of one open connection. Unrelated to the client-supplied id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

/// Fan-out hub over all open connections.
///
/// Each connection owns an unbounded outbound queue that its socket task
/// drains, so `broadcast` never waits on a socket. Cloning is cheap and every
/// clone refers to the same set.
#[derive(Clone, Default)]
pub struct Broadcaster {
  connections: Arc<Mutex<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>,
}

impl Broadcaster {
  pub fn new() -> Self { Self::default() }

  /// Register a new connection. It stays registered until the returned
  /// [`Subscription`] is dropped or [`disconnect`](Self::disconnect) is called.
  pub fn connect(&self) -> Subscription {
    let id = ConnectionId(Uuid::new_v4());
    let (tx, rx) = mpsc::unbounded_channel();
    let open = {
      let mut connections = self.connections.lock();
      connections.insert(id, tx);
      connections.len()
    };
    debug!(connection = %id, open, "connection registered");
    Subscription { id, rx, hub: self.clone() }
  }

  /// Remove a connection. Returns `false` if it was already gone.
  pub fn disconnect(&self, id: ConnectionId) -> bool {
    let removed = self.connections.lock().remove(&id).is_some();
    if removed {
      debug!(connection = %id, "connection removed");
    }
    removed
  }

  /// Queue `message` for every open connection, the sender included.
  ///
  /// A connection whose queue is closed is dropped from the set; delivery to
  /// the rest continues. Returns the number of connections the message was
  /// queued for.
  pub fn broadcast(&self, message: &str) -> usize {
    let mut connections = self.connections.lock();
    let mut closed = Vec::new();
    let mut delivered = 0;

    for (id, tx) in connections.iter() {
      match tx.send(message.to_owned()) {
        Ok(()) => delivered += 1,
        Err(_) => closed.push(*id),
      }
    }

    for id in closed {
      connections.remove(&id);
      debug!(connection = %id, "dropped closed connection during broadcast");
    }

    delivered
  }

  /// Number of currently open connections.
  pub fn len(&self) -> usize { self.connections.lock().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// A registered connection's handle on its outbound queue.
///
/// Dropping it removes the connection from the [`Broadcaster`], so the set is
/// cleaned up on every exit path of the owning socket task.
pub struct Subscription {
  id:  ConnectionId,
  rx:  mpsc::UnboundedReceiver<String>,
  hub: Broadcaster,
}

impl Subscription {
  pub fn id(&self) -> ConnectionId { self.id }

  /// Next message queued for this connection. `None` once the connection has
  /// been removed from the broadcaster and its queue is drained.
  pub async fn recv(&mut self) -> Option<String> { self.rx.recv().await }
}

impl Drop for Subscription {
  fn drop(&mut self) { self.hub.disconnect(self.id); }
}

/// Label inbound text with the sender's client id.
pub fn label_message(client_id: i64, text: &str) -> String {
  format!("Client {client_id}: {text}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn broadcast_reaches_every_connection_including_sender() {
    let hub = Broadcaster::new();
    let mut a = hub.connect();
    let mut b = hub.connect();

    let delivered = hub.broadcast(&label_message(7, "hello"));
    assert_eq!(delivered, 2);
    assert_eq!(a.recv().await.as_deref(), Some("Client 7: hello"));
    assert_eq!(b.recv().await.as_deref(), Some("Client 7: hello"));
  }

  #[tokio::test]
  async fn failed_send_does_not_stop_delivery_to_others() {
    let hub = Broadcaster::new();
    let mut a = hub.connect();
    let mut b = hub.connect();

    // B's socket side is gone but its subscription has not been dropped yet.
    b.rx.close();

    let delivered = hub.broadcast(&label_message(7, "hello"));
    assert_eq!(delivered, 1);
    assert_eq!(a.recv().await.as_deref(), Some("Client 7: hello"));

    // The failed connection was pruned.
    assert_eq!(hub.len(), 1);
    assert!(b.recv().await.is_none());
  }

  #[test]
  fn dropping_subscription_disconnects() {
    let hub = Broadcaster::new();
    let a = hub.connect();
    let b = hub.connect();
    assert_eq!(hub.len(), 2);

    drop(a);
    assert_eq!(hub.len(), 1);

    assert!(hub.disconnect(b.id()));
    assert!(!hub.disconnect(b.id()));
    drop(b);
    assert!(hub.is_empty());
  }

  #[test]
  fn broadcast_with_no_connections_is_a_no_op() {
    let hub = Broadcaster::new();
    assert_eq!(hub.broadcast("anyone?"), 0);
  }

  #[tokio::test]
  async fn late_joiner_misses_earlier_messages() {
    let hub = Broadcaster::new();
    let mut a = hub.connect();
    hub.broadcast("first");

    let mut b = hub.connect();
    hub.broadcast("second");

    assert_eq!(a.recv().await.as_deref(), Some("first"));
    assert_eq!(a.recv().await.as_deref(), Some("second"));
    assert_eq!(b.recv().await.as_deref(), Some("second"));
  }

  #[test]
  fn clones_share_one_set() {
    let hub = Broadcaster::new();
    let other = hub.clone();
    let _a = other.connect();
    assert_eq!(hub.len(), 1);
  }
}
