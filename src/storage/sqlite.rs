use super::{DocumentStore, PaletteRecord, StoredRecord};
use crate::error::StorageError;
use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub struct Storage {
    conn: Connection,
}

/// Local account as stored in `users`.
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS documents (
  collection TEXT NOT NULL,
  id TEXT NOT NULL,
  owner TEXT NOT NULL,
  created_at INTEGER NOT NULL,
  body_json TEXT NOT NULL,
  PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(collection, owner, created_at DESC);

CREATE TABLE IF NOT EXISTS users (
  id TEXT PRIMARY KEY,
  email TEXT NOT NULL UNIQUE,
  password_hash TEXT NOT NULL,
  salt TEXT NOT NULL,
  created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS session (
  slot INTEGER PRIMARY KEY CHECK (slot = 0),
  user_id TEXT NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn insert_document(
        &self,
        collection: &str,
        id: &str,
        owner: &str,
        created_at_ms: i64,
        body_json: &str,
    ) -> anyhow::Result<()> {
        self.conn
            .execute(
                r#"
INSERT INTO documents(collection, id, owner, created_at, body_json)
VALUES(?1, ?2, ?3, ?4, ?5)
"#,
                params![collection, id, owner, created_at_ms, body_json],
            )
            .context("insert document")?;
        Ok(())
    }

    /// `(id, body_json)` for one owner, newest first.
    pub fn documents_by_owner(
        &self,
        collection: &str,
        owner: &str,
    ) -> anyhow::Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
SELECT id, body_json
FROM documents
WHERE collection=?1 AND owner=?2
ORDER BY created_at DESC, rowid DESC
"#,
            )
            .context("prepare documents by owner")?;

        let rows = stmt
            .query_map(params![collection, owner], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .context("query documents by owner")?
            .collect::<Result<Vec<_>, _>>()
            .context("read document rows")?;
        Ok(rows)
    }

    /// Returns the number of rows removed (0 or 1).
    pub fn delete_document(&self, collection: &str, id: &str, owner: &str) -> anyhow::Result<usize> {
        self.conn
            .execute(
                "DELETE FROM documents WHERE collection=?1 AND id=?2 AND owner=?3",
                params![collection, id, owner],
            )
            .context("delete document")
    }

    pub fn insert_account(&self, account: &AccountRow, now_unix: i64) -> anyhow::Result<()> {
        self.conn
            .execute(
                r#"
INSERT INTO users(id, email, password_hash, salt, created_at)
VALUES(?1, ?2, ?3, ?4, ?5)
"#,
                params![
                    account.id,
                    account.email,
                    account.password_hash,
                    account.salt,
                    now_unix
                ],
            )
            .context("insert account")?;
        Ok(())
    }

    pub fn find_account_by_email(&self, email: &str) -> anyhow::Result<Option<AccountRow>> {
        self.find_account("SELECT id, email, password_hash, salt FROM users WHERE email=?1", email)
    }

    pub fn find_account_by_id(&self, id: &str) -> anyhow::Result<Option<AccountRow>> {
        self.find_account("SELECT id, email, password_hash, salt FROM users WHERE id=?1", id)
    }

    fn find_account(&self, sql: &str, key: &str) -> anyhow::Result<Option<AccountRow>> {
        self.conn
            .query_row(sql, params![key], |row| {
                Ok(AccountRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    salt: row.get(3)?,
                })
            })
            .optional()
            .context("query account")
    }

    pub fn set_session(&self, user_id: &str) -> anyhow::Result<()> {
        self.conn
            .execute(
                r#"
INSERT INTO session(slot, user_id)
VALUES(0, ?1)
ON CONFLICT(slot) DO UPDATE SET user_id=excluded.user_id
"#,
                params![user_id],
            )
            .context("set session")?;
        Ok(())
    }

    pub fn get_session(&self) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row("SELECT user_id FROM session WHERE slot=0", [], |row| row.get(0))
            .optional()
            .context("get session")
    }

    pub fn clear_session(&self) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM session", [])
            .context("clear session")?;
        Ok(())
    }
}

// rusqlite connections are not Sync; async callers open one per operation.
#[derive(Debug, Clone)]
pub struct StorageHandle {
    path: PathBuf,
}

impl StorageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(&self) -> anyhow::Result<Storage> {
        Storage::open(&self.path)
    }
}

/// `DocumentStore` on a local SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    handle: StorageHandle,
}

impl SqliteStore {
    pub fn new(handle: StorageHandle) -> Self {
        Self { handle }
    }
}

fn now_unix_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn create(&self, collection: &str, record: &PaletteRecord) -> Result<String, StorageError> {
        let body = serde_json::to_string(record).map_err(|e| StorageError::Create(e.to_string()))?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let created_at = record.created_at_ms.unwrap_or_else(now_unix_ms);
        let handle = self.handle.clone();
        let collection = collection.to_string();
        let owner = record.owner_id.clone();
        let doc_id = id.clone();

        tokio::task::spawn_blocking(move || {
            handle
                .open()?
                .insert_document(&collection, &doc_id, &owner, created_at, &body)
        })
        .await
        .map_err(|e| StorageError::Create(format!("spawn error: {e}")))?
        .map_err(|e| StorageError::Create(format!("{e:#}")))?;

        Ok(id)
    }

    async fn query_by_owner(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<StoredRecord>, StorageError> {
        let handle = self.handle.clone();
        let collection = collection.to_string();
        let owner = owner_id.to_string();

        let rows = tokio::task::spawn_blocking(move || {
            handle.open()?.documents_by_owner(&collection, &owner)
        })
        .await
        .map_err(|e| StorageError::Query(format!("spawn error: {e}")))?
        .map_err(|e| StorageError::Query(format!("{e:#}")))?;

        rows.into_iter()
            .map(|(id, body)| {
                let record = serde_json::from_str::<PaletteRecord>(&body)
                    .map_err(|e| StorageError::Decode(format!("document {id}: {e}")))?;
                Ok(StoredRecord { id, record })
            })
            .collect()
    }

    async fn delete(&self, collection: &str, id: &str, owner_id: &str) -> Result<(), StorageError> {
        let handle = self.handle.clone();
        let collection = collection.to_string();
        let doc_id = id.to_string();
        let owner = owner_id.to_string();

        let removed = tokio::task::spawn_blocking(move || {
            handle.open()?.delete_document(&collection, &doc_id, &owner)
        })
        .await
        .map_err(|e| StorageError::Delete(format!("spawn error: {e}")))?
        .map_err(|e| StorageError::Delete(format!("{e:#}")))?;

        if removed == 0 {
            tracing::debug!(document = %id, owner = %owner_id, "delete matched no owned document");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PALETTES;

    fn record(owner: &str, name: &str, at: i64) -> PaletteRecord {
        PaletteRecord {
            name: name.into(),
            colors: vec!["#AABBCC".into(), "#112233".into()],
            created_at_ms: Some(at),
            owner_id: owner.into(),
        }
    }

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let handle = StorageHandle::new(dir.path().join("paleta.sqlite3"));
        (dir, SqliteStore::new(handle))
    }

    #[tokio::test]
    async fn test_create_and_query_newest_first() {
        let (_dir, store) = temp_store();
        store.create(PALETTES, &record("u1", "old", 1_000)).await.unwrap();
        store.create(PALETTES, &record("u1", "new", 3_000)).await.unwrap();
        store.create(PALETTES, &record("u1", "mid", 2_000)).await.unwrap();
        store.create(PALETTES, &record("u2", "other", 5_000)).await.unwrap();

        let docs = store.query_by_owner(PALETTES, "u1").await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.record.name.as_str()).collect();
        assert_eq!(names, ["new", "mid", "old"]);
        assert_eq!(docs[0].record.colors, ["#AABBCC", "#112233"]);
    }

    #[tokio::test]
    async fn test_query_empty_owner() {
        let (_dir, store) = temp_store();
        let docs = store.query_by_owner(PALETTES, "nobody").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = temp_store();
        let id = store.create(PALETTES, &record("u1", "a", 1)).await.unwrap();
        store.delete(PALETTES, &id, "u1").await.unwrap();
        assert!(store.query_by_owner(PALETTES, "u1").await.unwrap().is_empty());

        // already gone
        store.delete(PALETTES, &id, "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_only_touches_owned_documents() {
        let (_dir, store) = temp_store();
        let id = store.create(PALETTES, &record("u1", "mine", 1)).await.unwrap();

        store.delete(PALETTES, &id, "u2").await.unwrap();

        let docs = store.query_by_owner(PALETTES, "u1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
    }

    #[test]
    fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("s.sqlite3")).unwrap();
        assert_eq!(storage.get_session().unwrap(), None);
        storage.set_session("u1").unwrap();
        storage.set_session("u2").unwrap();
        assert_eq!(storage.get_session().unwrap().as_deref(), Some("u2"));
        storage.clear_session().unwrap();
        assert_eq!(storage.get_session().unwrap(), None);
    }
}
