//! The `ItemStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `stockroom-store-sqlite`). Higher layers depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  history::HistoryRecord,
  item::{Item, ItemId, NewItem, Page},
};

/// Abstraction over a Stockroom storage backend.
///
/// Every method is its own commit. Lookups by id return `Option` so callers
/// must branch on absence before proceeding.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ItemStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Persist a new item, assigning its id and `created_at`.
  fn insert_item(
    &self,
    item: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// List items in ascending id order within `page`.
  fn list_items(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Replace the name and description of an item. Returns the updated item,
  /// or `None` if no item has this id.
  fn replace_item(
    &self,
    id: ItemId,
    item: NewItem,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Hard-delete an item. Returns the removed item, or `None` if no item has
  /// this id.
  fn delete_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  // ── History — append-only ─────────────────────────────────────────────

  /// Append an audit record with a server-assigned timestamp.
  fn insert_history(
    &self,
    operation: String,
  ) -> impl Future<Output = Result<HistoryRecord, Self::Error>> + Send + '_;

  /// List audit records in ascending id order within `page`.
  fn list_history(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<HistoryRecord>, Self::Error>> + Send + '_;
}
