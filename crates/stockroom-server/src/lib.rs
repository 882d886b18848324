//! Server assembly for Stockroom.
//!
//! Combines the item REST API, the WebSocket broadcaster and optional static
//! asset hosting into one axum [`Router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use stockroom_core::{history::AuditLanguage, service::ItemService, store::ItemStore};
use stockroom_notify::Broadcaster;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STOCKROOM_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Directory served at `/` for any path the API does not handle.
  #[serde(default)]
  pub static_dir:     Option<PathBuf>,
  #[serde(default)]
  pub audit_language: AuditLanguage,
}

/// Load configuration from an optional TOML file at `path`, overlaid with
/// `STOCKROOM_*` environment variables.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 10000)?
    .set_default("store_path", "stockroom.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("STOCKROOM"))
    .build()?
    .try_deserialize()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs. The item service and the broadcaster share
/// no state with each other.
#[derive(Clone)]
pub struct AppState<S> {
  pub service:     ItemService<S>,
  pub broadcaster: Broadcaster,
  pub config:      Arc<ServerConfig>,
}

impl<S: ItemStore> AppState<S> {
  pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
    Self {
      service:     ItemService::new(store, config.audit_language),
      broadcaster: Broadcaster::new(),
      config:      Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ItemStore + 'static,
{
  let mut app = Router::new()
    .merge(stockroom_api::api_router(state.service))
    .merge(stockroom_notify::ws_router(state.broadcaster));

  if let Some(dir) = &state.config.static_dir {
    app = app.fallback_service(ServeDir::new(dir));
  }

  app.layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
