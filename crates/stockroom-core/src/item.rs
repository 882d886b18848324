//! Item — the primary managed entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned item identity. Never reused after deletion.
pub type ItemId = i64;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id:          ItemId,
  pub name:        String,
  pub description: Option<String>,
  /// Server-assigned at insert; immutable afterwards.
  pub created_at:  DateTime<Utc>,
}

/// The caller-supplied fields of an item, used for both create and full
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
  pub name:        String,
  pub description: Option<String>,
}

impl NewItem {
  /// Build a `NewItem`, rejecting an empty name or over-long fields.
  pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self> {
    let item = Self { name: name.into(), description };
    item.validate()?;
    Ok(item)
  }

  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::Validation("name must not be empty".into()));
    }
    if self.name.chars().count() > MAX_NAME_LEN {
      return Err(Error::Validation(format!(
        "name must be at most {MAX_NAME_LEN} characters"
      )));
    }
    if let Some(description) = &self.description
      && description.chars().count() > MAX_DESCRIPTION_LEN
    {
      return Err(Error::Validation(format!(
        "description must be at most {MAX_DESCRIPTION_LEN} characters"
      )));
    }
    Ok(())
  }
}

/// An offset/limit window over the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub offset: u64,
  pub limit:  u64,
}

impl Page {
  pub const DEFAULT_LIMIT: u64 = 10;

  pub fn new(offset: u64, limit: u64) -> Self { Self { offset, limit } }
}

impl Default for Page {
  fn default() -> Self { Self::new(0, Self::DEFAULT_LIMIT) }
}
