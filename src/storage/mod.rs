//! Document store seam.
//!
//! Saved palettes live in a collection of schemaless documents. The app only
//! needs create, query-by-owner (newest first) and delete, so that is the
//! whole trait. `SqliteStore` is the local implementation.

pub mod sqlite;

use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use sqlite::{SqliteStore, Storage, StorageHandle};

/// Collection holding saved palettes.
pub const PALETTES: &str = "paletas";

/// Saved palette document as it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cores")]
    pub colors: Vec<String>,
    /// Unix milliseconds.
    #[serde(rename = "criadoEm", default)]
    pub created_at_ms: Option<i64>,
    #[serde(rename = "uid")]
    pub owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: String,
    pub record: PaletteRecord,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its assigned id.
    async fn create(&self, collection: &str, record: &PaletteRecord) -> Result<String, StorageError>;

    /// All documents owned by `owner_id`, newest `criadoEm` first.
    async fn query_by_owner(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<StoredRecord>, StorageError>;

    /// Remove a document owned by `owner_id`. An id that does not exist, or
    /// belongs to someone else, is left alone and the call still succeeds.
    async fn delete(&self, collection: &str, id: &str, owner_id: &str) -> Result<(), StorageError>;
}
