//! WebSocket notification broadcaster for Stockroom.
//!
//! Every text frame received on `/ws/{client_id}` is relayed, labelled with
//! the sender's client id, to every currently open connection. There is no
//! persistence, acknowledgement or replay; a connection only sees messages
//! broadcast while it is open.

pub mod broadcaster;
pub mod ws;

pub use broadcaster::{Broadcaster, ConnectionId, Subscription};
pub use ws::ws_router;
