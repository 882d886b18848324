//! Error types for `stockroom-core`.

use thiserror::Error;

use crate::item::ItemId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("item {0} not found")]
  ItemNotFound(ItemId),

  #[error("invalid item: {0}")]
  Validation(String),

  /// Any failure of the underlying [`ItemStore`](crate::store::ItemStore),
  /// including audit writes.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
