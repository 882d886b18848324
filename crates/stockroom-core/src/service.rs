//! [`ItemService`] — item CRUD with an audit record after every mutation.
//!
//! The item write and its audit write are two separate commits. If the audit
//! write fails the item change stays in place and the error is returned to
//! the caller.

use std::sync::Arc;

use crate::{
  Error, Result,
  audit::AuditLog,
  history::{AuditLanguage, Operation},
  item::{Item, ItemId, NewItem, Page},
  store::ItemStore,
};

pub struct ItemService<S> {
  store: Arc<S>,
  audit: AuditLog<S>,
}

impl<S> Clone for ItemService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), audit: self.audit.clone() }
  }
}

impl<S: ItemStore> ItemService<S> {
  pub fn new(store: Arc<S>, language: AuditLanguage) -> Self {
    let audit = AuditLog::new(Arc::clone(&store), language);
    Self { store, audit }
  }

  pub async fn create(&self, input: NewItem) -> Result<Item> {
    input.validate()?;
    let item = self.store.insert_item(input).await.map_err(Error::store)?;
    tracing::info!(item_id = item.id, "item created");
    self.audit.record(Operation::Created).await?;
    Ok(item)
  }

  pub async fn read(&self, id: ItemId) -> Result<Item> {
    self
      .store
      .get_item(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(id))
  }

  /// Replace name and description. Audits only when the item existed.
  pub async fn update(&self, id: ItemId, input: NewItem) -> Result<Item> {
    input.validate()?;
    let item = self
      .store
      .replace_item(id, input)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(id))?;
    tracing::info!(item_id = id, "item updated");
    self.audit.record(Operation::Updated).await?;
    Ok(item)
  }

  /// Hard-delete an item and return it as it was before removal.
  pub async fn delete(&self, id: ItemId) -> Result<Item> {
    let item = self
      .store
      .delete_item(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ItemNotFound(id))?;
    tracing::info!(item_id = id, "item deleted");
    self.audit.record(Operation::Deleted).await?;
    Ok(item)
  }

  pub async fn list(&self, page: Page) -> Result<Vec<Item>> {
    self.store.list_items(page).await.map_err(Error::store)
  }
}
