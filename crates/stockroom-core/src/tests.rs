//! Service and audit tests against an in-memory [`ItemStore`].

use std::{
  collections::BTreeMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use chrono::Utc;

use crate::{
  Error,
  history::{AuditLanguage, HistoryRecord, Operation},
  item::{Item, ItemId, NewItem, Page},
  service::ItemService,
  store::ItemStore,
};

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("history write refused")]
struct MemoryError;

#[derive(Default)]
struct MemoryStore {
  items:         Mutex<BTreeMap<ItemId, Item>>,
  history:       Mutex<Vec<HistoryRecord>>,
  next_item_id:  Mutex<ItemId>,
  fail_history:  AtomicBool,
}

impl MemoryStore {
  fn history_labels(&self) -> Vec<String> {
    self
      .history
      .lock()
      .unwrap()
      .iter()
      .map(|r| r.operation.clone())
      .collect()
  }
}

fn window<T: Clone>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
  rows
    .skip(page.offset as usize)
    .take(page.limit as usize)
    .collect()
}

impl ItemStore for MemoryStore {
  type Error = MemoryError;

  async fn insert_item(&self, item: NewItem) -> Result<Item, MemoryError> {
    let mut next = self.next_item_id.lock().unwrap();
    *next += 1;
    let item = Item {
      id:          *next,
      name:        item.name,
      description: item.description,
      created_at:  Utc::now(),
    };
    self.items.lock().unwrap().insert(item.id, item.clone());
    Ok(item)
  }

  async fn get_item(&self, id: ItemId) -> Result<Option<Item>, MemoryError> {
    Ok(self.items.lock().unwrap().get(&id).cloned())
  }

  async fn list_items(&self, page: Page) -> Result<Vec<Item>, MemoryError> {
    Ok(window(self.items.lock().unwrap().values().cloned(), page))
  }

  async fn replace_item(
    &self,
    id: ItemId,
    item: NewItem,
  ) -> Result<Option<Item>, MemoryError> {
    let mut items = self.items.lock().unwrap();
    Ok(items.get_mut(&id).map(|existing| {
      existing.name = item.name;
      existing.description = item.description;
      existing.clone()
    }))
  }

  async fn delete_item(&self, id: ItemId) -> Result<Option<Item>, MemoryError> {
    Ok(self.items.lock().unwrap().remove(&id))
  }

  async fn insert_history(
    &self,
    operation: String,
  ) -> Result<HistoryRecord, MemoryError> {
    if self.fail_history.load(Ordering::SeqCst) {
      return Err(MemoryError);
    }
    let mut history = self.history.lock().unwrap();
    let record = HistoryRecord {
      id: history.len() as i64 + 1,
      operation,
      time: Utc::now(),
    };
    history.push(record.clone());
    Ok(record)
  }

  async fn list_history(
    &self,
    page: Page,
  ) -> Result<Vec<HistoryRecord>, MemoryError> {
    Ok(window(self.history.lock().unwrap().iter().cloned(), page))
  }
}

fn service() -> (Arc<MemoryStore>, ItemService<MemoryStore>) {
  let store = Arc::new(MemoryStore::default());
  let service = ItemService::new(Arc::clone(&store), AuditLanguage::English);
  (store, service)
}

fn pen(description: &str) -> NewItem {
  NewItem::new("pen", Some(description.to_owned())).unwrap()
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_read_returns_same_fields() {
  let (_, svc) = service();

  let created = svc.create(pen("blue")).await.unwrap();
  assert_eq!(created.id, 1);

  let read = svc.read(created.id).await.unwrap();
  assert_eq!(read, created);
}

#[tokio::test]
async fn pen_scenario_create_update_delete() {
  let (_, svc) = service();

  let created = svc.create(pen("blue")).await.unwrap();
  assert_eq!((created.id, created.description.as_deref()), (1, Some("blue")));

  let updated = svc.update(1, pen("red")).await.unwrap();
  assert_eq!(updated.id, 1);
  assert_eq!(updated.name, "pen");
  assert_eq!(updated.description.as_deref(), Some("red"));
  assert_eq!(updated.created_at, created.created_at);

  let deleted = svc.delete(1).await.unwrap();
  assert_eq!(deleted.description.as_deref(), Some("red"));

  assert!(matches!(svc.read(1).await, Err(Error::ItemNotFound(1))));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
  let (_, svc) = service();
  assert!(matches!(svc.read(42).await, Err(Error::ItemNotFound(42))));
  assert!(matches!(
    svc.update(42, pen("red")).await,
    Err(Error::ItemNotFound(42))
  ));
  assert!(matches!(svc.delete(42).await, Err(Error::ItemNotFound(42))));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
  let (store, svc) = service();
  let blank = NewItem { name: String::new(), description: None };

  assert!(matches!(svc.create(blank).await, Err(Error::Validation(_))));
  assert!(store.items.lock().unwrap().is_empty());
  assert!(store.history_labels().is_empty());
}

#[tokio::test]
async fn list_defaults_to_first_ten() {
  let (_, svc) = service();
  for i in 0..12 {
    svc.create(NewItem::new(format!("item {i}"), None).unwrap()).await.unwrap();
  }

  let page = svc.list(Page::default()).await.unwrap();
  let ids: Vec<_> = page.iter().map(|i| i.id).collect();
  assert_eq!(ids, (1..=10).collect::<Vec<_>>());

  let tail = svc.list(Page::new(10, 10)).await.unwrap();
  assert_eq!(tail.len(), 2);
}

// ─── Audit ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn each_mutation_writes_exactly_one_record() {
  let (store, svc) = service();

  svc.create(pen("blue")).await.unwrap();
  assert_eq!(store.history_labels(), ["item created"]);

  svc.read(1).await.unwrap();
  svc.list(Page::default()).await.unwrap();
  assert_eq!(store.history_labels().len(), 1, "reads must not audit");

  svc.update(1, pen("red")).await.unwrap();
  svc.delete(1).await.unwrap();
  assert_eq!(
    store.history_labels(),
    ["item created", "item updated", "item deleted"]
  );
}

#[tokio::test]
async fn failed_mutations_are_not_audited() {
  let (store, svc) = service();
  let _ = svc.update(7, pen("red")).await;
  let _ = svc.delete(7).await;
  assert!(store.history_labels().is_empty());
}

#[tokio::test]
async fn labels_follow_configured_language() {
  let store = Arc::new(MemoryStore::default());
  let svc = ItemService::new(Arc::clone(&store), AuditLanguage::Russian);

  svc.create(pen("blue")).await.unwrap();
  svc.update(1, pen("red")).await.unwrap();
  svc.delete(1).await.unwrap();

  assert_eq!(
    store.history_labels(),
    [
      Operation::Created.label(AuditLanguage::Russian),
      Operation::Updated.label(AuditLanguage::Russian),
      Operation::Deleted.label(AuditLanguage::Russian),
    ]
  );
}

#[tokio::test]
async fn audit_failure_surfaces_as_store_error_after_commit() {
  let (store, svc) = service();
  store.fail_history.store(true, Ordering::SeqCst);

  let err = svc.create(pen("blue")).await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));

  // The item write was its own commit and is not rolled back.
  assert!(store.items.lock().unwrap().contains_key(&1));
}
