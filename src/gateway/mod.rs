//! Save / list / delete workflows for palettes.
//!
//! Every workflow needs a signed-in user and fails with
//! `GatewayError::Unauthenticated` before touching the store otherwise.

use crate::color::Swatch;
use crate::error::GatewayError;
use crate::identity::User;
use crate::storage::{DocumentStore, PaletteRecord, StoredRecord, PALETTES};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use time::macros::format_description;
use time::OffsetDateTime;

/// A saved palette as shown in the saved palettes list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPalette {
    pub id: String,
    pub name: String,
    pub colors: Vec<String>,
    pub created_at: OffsetDateTime,
    pub owner_id: String,
}

impl SavedPalette {
    fn from_stored(doc: StoredRecord, read_at: OffsetDateTime) -> Self {
        let created_at = doc
            .record
            .created_at_ms
            .and_then(|ms| OffsetDateTime::from_unix_timestamp_nanos(ms as i128 * 1_000_000).ok())
            .unwrap_or(read_at);
        Self {
            id: doc.id,
            name: doc.record.name,
            colors: doc.record.colors,
            created_at,
            owner_id: doc.record.owner_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

struct Inner {
    store: Arc<dyn DocumentStore>,
    saving: AtomicBool,
}

#[derive(Clone)]
pub struct PaletteGateway {
    inner: Arc<Inner>,
}

impl PaletteGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                saving: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.inner.saving.load(Ordering::SeqCst)
    }

    /// First half of a save: checks, snapshot and single-flight flag.
    ///
    /// Runs synchronously so the colors saved are the ones on screen when the
    /// user asked, whatever happens to the palette afterwards. The flag stays
    /// set until the returned `PendingSave` is committed or dropped.
    pub fn begin_save(
        &self,
        swatches: &[Swatch],
        user: Option<&User>,
    ) -> Result<PendingSave, GatewayError> {
        let user = user.ok_or(GatewayError::Unauthenticated)?;
        if swatches.is_empty() {
            return Err(GatewayError::Validation("Generate a palette first".into()));
        }
        let guard = SaveGuard::acquire(&self.inner)?;

        let now = now_local();
        let record = PaletteRecord {
            name: default_palette_name(now),
            colors: swatches.iter().map(|s| s.value.clone()).collect(),
            created_at_ms: Some(unix_millis(now)),
            owner_id: user.id.clone(),
        };

        Ok(PendingSave {
            store: self.inner.store.clone(),
            record,
            _guard: guard,
        })
    }

    pub async fn save(&self, swatches: &[Swatch], user: Option<&User>) -> Result<String, GatewayError> {
        self.begin_save(swatches, user)?.commit().await
    }

    /// The user's saved palettes, newest first.
    pub async fn list(&self, user: Option<&User>) -> Result<Vec<SavedPalette>, GatewayError> {
        let user = user.ok_or(GatewayError::Unauthenticated)?;
        let docs = self.inner.store.query_by_owner(PALETTES, &user.id).await?;
        let read_at = OffsetDateTime::now_utc();
        tracing::debug!(user = %user.id, count = docs.len(), "listed palettes");
        Ok(docs
            .into_iter()
            .map(|d| SavedPalette::from_stored(d, read_at))
            .collect())
    }

    /// Delete one saved palette once the user has confirmed.
    ///
    /// Callers drop the palette from their own list only after this returns
    /// `Deleted`.
    pub async fn delete(
        &self,
        record_id: &str,
        user: Option<&User>,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, GatewayError> {
        let user = user.ok_or(GatewayError::Unauthenticated)?;
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.inner.store.delete(PALETTES, record_id, &user.id).await?;
        tracing::info!(user = %user.id, palette = %record_id, "deleted palette");
        Ok(DeleteOutcome::Deleted)
    }
}

/// Save that has passed its checks and holds the saving flag.
pub struct PendingSave {
    store: Arc<dyn DocumentStore>,
    record: PaletteRecord,
    _guard: SaveGuard,
}

impl PendingSave {
    pub fn owner_id(&self) -> &str {
        &self.record.owner_id
    }

    /// Create the record. The saving flag is released on return either way.
    pub async fn commit(self) -> Result<String, GatewayError> {
        match self.store.create(PALETTES, &self.record).await {
            Ok(id) => {
                tracing::info!(palette = %id, colors = self.record.colors.len(), "saved palette");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("save failed: {e}");
                Err(e.into())
            }
        }
    }
}

struct SaveGuard {
    inner: Arc<Inner>,
}

impl SaveGuard {
    fn acquire(inner: &Arc<Inner>) -> Result<Self, GatewayError> {
        inner
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| GatewayError::SaveInProgress)?;
        Ok(Self {
            inner: inner.clone(),
        })
    }
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.inner.saving.store(false, Ordering::SeqCst);
    }
}

fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn unix_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

/// `Paleta dd/mm/yyyy`.
pub fn default_palette_name(at: OffsetDateTime) -> String {
    let date = at
        .format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| at.date().to_string());
    format!("Paleta {date}")
}
