//! JSON REST API for Stockroom.
//!
//! Exposes an axum [`Router`] backed by an [`ItemService`] over any
//! [`ItemStore`]. Transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(stockroom_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod items;

use axum::{Router, routing::get};
use stockroom_core::{service::ItemService, store::ItemStore};

pub use error::ApiError;

/// Build the item API router for `service`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: ItemService<S>) -> Router<()>
where
  S: ItemStore + 'static,
{
  Router::new()
    .route("/items", get(items::list::<S>).post(items::create::<S>))
    .route("/items/", get(items::list::<S>).post(items::create::<S>))
    .route(
      "/items/{id}",
      get(items::get_one::<S>)
        .put(items::update_one::<S>)
        .delete(items::delete_one::<S>),
    )
    .with_state(service)
}
