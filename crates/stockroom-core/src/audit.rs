//! Audit logger: one history row per successful item mutation.

use std::sync::Arc;

use crate::{
  Error, Result,
  history::{AuditLanguage, HistoryRecord, Operation},
  store::ItemStore,
};

/// Writes audit records through an [`ItemStore`].
///
/// Writes are synchronous with the calling operation, unbatched and never
/// retried. A failed write surfaces as [`Error::Store`].
pub struct AuditLog<S> {
  store:    Arc<S>,
  language: AuditLanguage,
}

impl<S> Clone for AuditLog<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), language: self.language }
  }
}

impl<S: ItemStore> AuditLog<S> {
  pub fn new(store: Arc<S>, language: AuditLanguage) -> Self {
    Self { store, language }
  }

  /// Persist the label for `operation`.
  pub async fn record(&self, operation: Operation) -> Result<HistoryRecord> {
    let label = operation.label(self.language).to_owned();
    let record = self
      .store
      .insert_history(label)
      .await
      .map_err(Error::store)?;
    tracing::debug!(history_id = record.id, %operation, "audit record written");
    Ok(record)
  }
}
