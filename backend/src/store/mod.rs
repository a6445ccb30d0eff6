//! # Persistence Store
//!
//! Key-value storage for the two record kinds the service keeps on disk:
//!
//! - `inspections`: one JSON record per inspection, keyed by inspection id.
//! - `template`: the singleton checklist template under the fixed key
//!   `"current"`.
//!
//! Each collection is a SQLite table of `(key, body)` rows with the record
//! serialized as JSON text. Every operation opens its own connection and
//! stands alone: a put is an `INSERT OR REPLACE`, so concurrent writers to the
//! same key simply race and the last write wins. There are no cross-collection
//! transactions and no retries; errors go straight back to the caller.

use common::model::inspection::Inspection;
use common::model::template::{Template, CURRENT_TEMPLATE_KEY};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored record `{key}` in `{collection}` is unreadable: {source}")]
    Decode {
        collection: &'static str,
        key: String,
        source: serde_json::Error,
    },

    #[error("Record could not be serialized: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Inspections,
    Template,
}

impl Collection {
    fn table(self) -> &'static str {
        match self {
            Collection::Inspections => "inspections",
            Collection::Template => "template",
        }
    }
}

/// Handle on the SQLite file; cheap to clone and share across workers.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Store, StoreError> {
        let store = Store {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        for collection in [Collection::Inspections, Collection::Template] {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (key TEXT PRIMARY KEY, body TEXT NOT NULL)",
                    collection.table()
                ),
                [],
            )?;
        }
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn put<T: Serialize>(
        &self,
        collection: Collection,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(record)?;
        let conn = self.connect()?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (key, body) VALUES (?1, ?2)",
                collection.table()
            ),
            params![key, body],
        )?;
        debug!("put {}/{} ({} bytes)", collection.table(), key, body.len());
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let conn = self.connect()?;
        let body: Option<String> = conn
            .query_row(
                &format!("SELECT body FROM {} WHERE key = ?1", collection.table()),
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| decode(collection, key, &body)).transpose()
    }

    /// All records of a collection, ordered by key.
    pub fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT key, body FROM {} ORDER BY key",
            collection.table()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (key, body) = row?;
            records.push(decode(collection, &key, &body)?);
        }
        Ok(records)
    }

    /// Removes a record; returns whether one existed.
    pub fn delete(&self, collection: Collection, key: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE key = ?1", collection.table()),
            params![key],
        )?;
        debug!("delete {}/{} -> {}", collection.table(), key, removed);
        Ok(removed > 0)
    }

    pub fn current_template(&self) -> Result<Option<Template>, StoreError> {
        self.get(Collection::Template, CURRENT_TEMPLATE_KEY)
    }

    pub fn save_template(&self, template: &Template) -> Result<(), StoreError> {
        self.put(Collection::Template, CURRENT_TEMPLATE_KEY, template)
    }

    pub fn inspection(&self, id: &str) -> Result<Option<Inspection>, StoreError> {
        self.get(Collection::Inspections, id)
    }

    pub fn inspections(&self) -> Result<Vec<Inspection>, StoreError> {
        self.get_all(Collection::Inspections)
    }

    pub fn save_inspection(&self, inspection: &Inspection) -> Result<(), StoreError> {
        self.put(Collection::Inspections, &inspection.id, inspection)
    }

    pub fn delete_inspection(&self, id: &str) -> Result<bool, StoreError> {
        self.delete(Collection::Inspections, id)
    }
}

fn decode<T: DeserializeOwned>(
    collection: Collection,
    key: &str,
    body: &str,
) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|source| StoreError::Decode {
        collection: collection.table(),
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Store;
    use tempfile::TempDir;

    /// Store in a throwaway directory; keep the `TempDir` alive for the test.
    pub fn temp_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.sqlite")).unwrap();
        (dir, store)
    }
}
