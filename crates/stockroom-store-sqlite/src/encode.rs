//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use stockroom_core::{
  history::HistoryRecord,
  item::{Item, Page},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// `(limit, offset)` as SQLite integers. Values past `i64::MAX` saturate,
/// which SQLite treats as "no bound" in practice.
pub fn encode_page(page: Page) -> (i64, i64) {
  (
    i64::try_from(page.limit).unwrap_or(i64::MAX),
    i64::try_from(page.offset).unwrap_or(i64::MAX),
  )
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const ITEM_COLUMNS: &str = "id, name, description, created_at";

/// An `items` row as read from SQLite, before timestamp decoding.
pub struct RawItem {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub created_at:  String,
}

impl RawItem {
  /// Map a row selected with [`ITEM_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      created_at:  row.get(3)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:          self.id,
      name:        self.name,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// A `history` row as read from SQLite.
pub struct RawHistory {
  pub id:        i64,
  pub operation: String,
  pub time:      String,
}

impl RawHistory {
  pub fn into_record(self) -> Result<HistoryRecord> {
    Ok(HistoryRecord {
      id:        self.id,
      operation: self.operation,
      time:      decode_dt(&self.time)?,
    })
  }
}
