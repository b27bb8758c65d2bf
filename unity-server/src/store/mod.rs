//! redb-based record store: named JSON document collections
//!
//! # Layout
//!
//! One table, `collections`, keyed by collection name with a single
//! JSON-serialized document per key:
//!
//! | Collection | Document |
//! |------------|----------|
//! | `menu` | `Vec<MenuItem>` |
//! | `orders` | `Vec<Order>` |
//! | `order_counter` | `{ "counter": N }` |
//! | `rewards` | map of userId → profile |
//! | `seed_flag` | `{ "seededAt": ..., "version": ... }` |
//!
//! Writes replace the whole document; merge semantics belong to callers.
//! redb commits are atomic, so a reader never observes a half-written
//! document, and redb admits a single writer at a time, so every
//! [`RecordStore::update`] (read-modify-write inside one write transaction)
//! is a critical section. Interleaved requests mutating the same collection
//! serialize instead of losing updates.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Document table: key = collection name, value = JSON document
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Collection names used by the engine
pub mod collections {
    pub const MENU: &str = "menu";
    pub const ORDERS: &str = "orders";
    pub const ORDER_COUNTER: &str = "order_counter";
    pub const REWARDS: &str = "rewards";
    pub const SEED_FLAG: &str = "seed_flag";
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable record store backed by redb
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read a collection's document, or the supplied default when the
    /// collection does not exist. A missing collection is not an error.
    pub fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        default: impl FnOnce() -> T,
    ) -> StoreResult<T> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(collection)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(default()),
        }
    }

    /// Replace a collection's document in full
    pub fn write<T: Serialize>(&self, collection: &str, document: &T) -> StoreResult<()> {
        let value = serde_json::to_vec(document)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(collection, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Create a collection with initial content if (and only if) it does not
    /// exist yet. Idempotent: never overwrites, even across restarts or
    /// concurrent callers — the existence check runs inside the write
    /// transaction.
    pub fn initialize_if_absent<T: Serialize>(
        &self,
        collection: &str,
        initial: &T,
    ) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            if table.get(collection)?.is_none() {
                let value = serde_json::to_vec(initial)?;
                table.insert(collection, value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove a collection entirely. Returns whether it existed.
    pub fn delete(&self, collection: &str) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        let existed;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            existed = table.remove(collection)?.is_some();
        }
        txn.commit()?;
        Ok(existed)
    }

    /// Read-modify-write a collection inside a single write transaction.
    ///
    /// The closure receives the current document (or the default when the
    /// collection is missing) and may return any error convertible from
    /// [`StoreError`]; returning an error aborts the transaction and leaves
    /// the collection untouched.
    pub fn update<T, R, E>(
        &self,
        collection: &str,
        default: impl FnOnce() -> T,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
    {
        let txn = self.db.begin_write().map_err(StoreError::from)?;

        let result = {
            let mut table = txn.open_table(COLLECTIONS_TABLE).map_err(StoreError::from)?;

            let mut document: T = match table.get(collection).map_err(StoreError::from)? {
                Some(guard) => serde_json::from_slice(guard.value()).map_err(StoreError::from)?,
                None => default(),
            };

            match f(&mut document) {
                Ok(result) => {
                    let value = serde_json::to_vec(&document).map_err(StoreError::from)?;
                    table
                        .insert(collection, value.as_slice())
                        .map_err(StoreError::from)?;
                    Ok(result)
                }
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(result) => {
                txn.commit().map_err(StoreError::from)?;
                Ok(result)
            }
            Err(e) => {
                txn.abort().map_err(StoreError::from)?;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_collection_returns_default() {
        let store = RecordStore::open_in_memory().unwrap();
        let menu: Vec<String> = store.read("menu", Vec::new).unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write("menu", &vec!["margherita".to_string()]).unwrap();

        let menu: Vec<String> = store.read("menu", Vec::new).unwrap();
        assert_eq!(menu, vec!["margherita".to_string()]);
    }

    #[test]
    fn test_initialize_if_absent_never_overwrites() {
        let store = RecordStore::open_in_memory().unwrap();

        store.initialize_if_absent("counter", &42u64).unwrap();
        store.initialize_if_absent("counter", &7u64).unwrap();
        store.initialize_if_absent("counter", &7u64).unwrap();

        let counter: u64 = store.read("counter", || 0).unwrap();
        assert_eq!(counter, 42);
    }

    #[test]
    fn test_update_applies_in_place() {
        let store = RecordStore::open_in_memory().unwrap();

        let issued: Result<u64, StoreError> = store.update("counter", || 1u64, |c| {
            let current = *c;
            *c += 1;
            Ok(current)
        });
        assert_eq!(issued.unwrap(), 1);

        let counter: u64 = store.read("counter", || 0).unwrap();
        assert_eq!(counter, 2);
    }

    #[test]
    fn test_update_error_aborts_transaction() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write("counter", &10u64).unwrap();

        #[derive(Debug, thiserror::Error)]
        enum TestError {
            #[error("store: {0}")]
            Store(#[from] StoreError),
            #[error("rejected")]
            Rejected,
        }

        let result: Result<(), TestError> = store.update("counter", || 0u64, |c| {
            *c += 99;
            Err(TestError::Rejected)
        });
        assert!(matches!(result, Err(TestError::Rejected)));

        // Aborted transaction must leave the document untouched
        let counter: u64 = store.read("counter", || 0).unwrap();
        assert_eq!(counter, 10);
    }

    #[test]
    fn test_delete_collection() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write("seed_flag", &true).unwrap();

        assert!(store.delete("seed_flag").unwrap());
        assert!(!store.delete("seed_flag").unwrap());

        let flag: Option<bool> = store.read("seed_flag", || None).unwrap();
        assert_eq!(flag, None);
    }
}
