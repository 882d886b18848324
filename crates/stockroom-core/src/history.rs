//! Audit history records and the operation labels written into them.
//!
//! History rows are strictly append-only and carry no reference back to the
//! item that caused them; only the operation kind and the time are kept.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
  pub id:        i64,
  pub operation: String,
  pub time:      DateTime<Utc>,
}

/// The kind of item mutation being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  Created,
  Updated,
  Deleted,
}

/// Language the audit labels are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditLanguage {
  #[default]
  #[serde(rename = "en")]
  English,
  #[serde(rename = "ru")]
  Russian,
}

impl Operation {
  /// The fixed label stored in the `history.operation` column.
  pub fn label(self, language: AuditLanguage) -> &'static str {
    match (language, self) {
      (AuditLanguage::English, Self::Created) => "item created",
      (AuditLanguage::English, Self::Updated) => "item updated",
      (AuditLanguage::English, Self::Deleted) => "item deleted",
      (AuditLanguage::Russian, Self::Created) => "вещь создана",
      (AuditLanguage::Russian, Self::Updated) => "вещь обновлена",
      (AuditLanguage::Russian, Self::Deleted) => "вещь удалена",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Created => "created",
      Self::Updated => "updated",
      Self::Deleted => "deleted",
    })
  }
}
