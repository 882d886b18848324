//! [`SqliteStore`] — the SQLite implementation of [`ItemStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use stockroom_core::{
  history::HistoryRecord,
  item::{Item, ItemId, NewItem, Page},
  store::ItemStore,
};

use crate::{
  encode::{encode_dt, encode_page, RawHistory, RawItem, ITEM_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Stockroom item store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each
/// `call` closure borrows the connection for the duration of one request's
/// query and releases it on every exit path, errors included.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row `UPDATE`/`DELETE ... RETURNING` statement.
  async fn mutate_returning(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &sql,
            rusqlite::params_from_iter(params),
            RawItem::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }
}

// ─── ItemStore impl ──────────────────────────────────────────────────────────

impl ItemStore for SqliteStore {
  type Error = Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn insert_item(&self, input: NewItem) -> Result<Item> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let name       = input.name.clone();
    let desc       = input.description.clone();

    let id: ItemId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO items (name, description, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, desc, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Item {
      id,
      name: input.name,
      description: input.description,
      created_at,
    })
  }

  async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            rusqlite::params![id],
            RawItem::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn list_items(&self, page: Page) -> Result<Vec<Item>> {
    let (limit, offset) = encode_page(page);

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM items ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn replace_item(&self, id: ItemId, input: NewItem) -> Result<Option<Item>> {
    self
      .mutate_returning(
        format!(
          "UPDATE items SET name = ?1, description = ?2 WHERE id = ?3
           RETURNING {ITEM_COLUMNS}"
        ),
        vec![
          input.name.into(),
          input.description.into(),
          id.into(),
        ],
      )
      .await
  }

  async fn delete_item(&self, id: ItemId) -> Result<Option<Item>> {
    self
      .mutate_returning(
        format!("DELETE FROM items WHERE id = ?1 RETURNING {ITEM_COLUMNS}"),
        vec![id.into()],
      )
      .await
  }

  // ── History — append-only writes ──────────────────────────────────────────

  async fn insert_history(&self, operation: String) -> Result<HistoryRecord> {
    let time   = Utc::now();
    let at_str = encode_dt(time);
    let label  = operation.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO history (operation, time) VALUES (?1, ?2)",
          rusqlite::params![label, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(HistoryRecord { id, operation, time })
  }

  async fn list_history(&self, page: Page) -> Result<Vec<HistoryRecord>> {
    let (limit, offset) = encode_page(page);

    let raws: Vec<RawHistory> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, operation, time FROM history ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], |row| {
            Ok(RawHistory {
              id:        row.get(0)?,
              operation: row.get(1)?,
              time:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistory::into_record).collect()
  }
}
