//! Pair store backed by an embedded redb database
//!
//! Every operation runs inside exactly one redb transaction, so concurrent
//! callers observe each `get`, `set` or `delete` as all-or-nothing. redb
//! serializes write transactions and gives readers a consistent snapshot;
//! no extra locking happens here.

use crate::error::Result;
use crate::pair::{derive_key, derive_value};
use redb::{Database, ReadableTable, TableDefinition, TableError, TableHandle};

/// Name of the table holding every pair.
pub const MAIN_BUCKET: &str = "main";

const MAIN_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new(MAIN_BUCKET);

/// Trait defining the interface for pair storage operations
pub trait Store: Send + Sync {
    /// Get the stored value of a pair, if it exists
    fn get(&self, user: &str, name: &str) -> Result<Option<String>>;

    /// Set the value of a new or existing pair
    fn set(&self, user: &str, name: &str, value: &str) -> Result<()>;

    /// Delete a pair; deleting an absent pair is not an error
    fn delete(&self, user: &str, name: &str) -> Result<()>;
}

/// Pair store that owns a redb database handle
pub struct PairStore {
    db: Database,
}

impl PairStore {
    /// Create a pair store over an opened database
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Store for PairStore {
    fn get(&self, user: &str, name: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(MAIN_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let key = derive_key(user, name);
        let value = table
            .get(key.as_slice())?
            .map(|guard| String::from_utf8_lossy(guard.value()).into_owned());
        Ok(value)
    }

    fn set(&self, user: &str, name: &str, value: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MAIN_TABLE)?;
            let key = derive_key(user, name);
            let value = derive_value(value);
            table.insert(key.as_slice(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn delete(&self, user: &str, name: &str) -> Result<()> {
        let txn = self.db.begin_write()?;

        // Opening the table in a write transaction would create it.
        let exists = txn
            .list_tables()?
            .any(|handle| handle.name() == MAIN_BUCKET);
        if !exists {
            txn.abort()?;
            return Ok(());
        }

        {
            let mut table = txn.open_table(MAIN_TABLE)?;
            let key = derive_key(user, name);
            table.remove(key.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    const MOCK_PAIRS: [(&str, &str); 2] = [("0000:alpha", "Alpha.\n"), ("0000:bravo", "Bravo.\n")];

    /// Open a temporary file-backed store populated with `MOCK_PAIRS`
    fn mock_store() -> (TempDir, PairStore) {
        let dir = tempdir().unwrap();
        let db = db::open(dir.path().join("test.db")).unwrap();

        let txn = db.begin_write().unwrap();
        {
            let mut table = txn.open_table(MAIN_TABLE).unwrap();
            for (key, value) in MOCK_PAIRS {
                table.insert(key.as_bytes(), value.as_bytes()).unwrap();
            }
        }
        txn.commit().unwrap();

        (dir, PairStore::new(db))
    }

    /// Read raw bytes from the main table, bypassing key derivation
    fn raw_get(store: &PairStore, key: &str) -> Option<Vec<u8>> {
        let txn = store.db.begin_read().unwrap();
        let table = txn.open_table(MAIN_TABLE).unwrap();
        let value = table.get(key.as_bytes()).unwrap();
        value.map(|guard| guard.value().to_vec())
    }

    fn table_exists(store: &PairStore) -> bool {
        let txn = store.db.begin_read().unwrap();
        let exists = txn
            .list_tables()
            .unwrap()
            .any(|handle| handle.name() == MAIN_BUCKET);
        exists
    }

    #[test]
    fn test_get_pair() {
        let (_dir, store) = mock_store();

        assert_eq!(store.get("0000", "alpha").unwrap(), Some("Alpha.\n".to_string()));
        assert_eq!(store.get("0000", "ALPHA").unwrap(), Some("Alpha.\n".to_string()));
        assert_eq!(store.get("0000", "nope").unwrap(), None);
    }

    #[test]
    fn test_get_pair_without_bucket() {
        let store = PairStore::new(db::open_in_memory().unwrap());

        assert_eq!(store.get("0000", "alpha").unwrap(), None);
        assert!(!table_exists(&store));
    }

    #[test]
    fn test_set_pair() {
        let (_dir, store) = mock_store();

        store.set("0000", "test", "Test.\n").unwrap();
        assert_eq!(raw_get(&store, "0000:test"), Some(b"Test.\n".to_vec()));

        store.set("0000", "alpha", "  Alpha.  ").unwrap();
        assert_eq!(raw_get(&store, "0000:alpha"), Some(b"Alpha.\n".to_vec()));
    }

    #[test]
    fn test_set_pair_creates_bucket() {
        let store = PairStore::new(db::open_in_memory().unwrap());

        store.set("User", "Name", "\tvalue\n\n").unwrap();
        assert!(table_exists(&store));
        assert_eq!(raw_get(&store, "user:name"), Some(b"value\n".to_vec()));
        assert_eq!(store.get("USER", "name").unwrap(), Some("value\n".to_string()));
    }

    #[test]
    fn test_set_pair_overwrites_and_is_idempotent() {
        let (_dir, store) = mock_store();

        store.set("0000", "alpha", "first").unwrap();
        store.set("0000", "ALPHA", "second").unwrap();
        store.set("0000", "alpha", "second").unwrap();

        assert_eq!(store.get("0000", "alpha").unwrap(), Some("second\n".to_string()));
        assert_eq!(raw_get(&store, "0000:bravo"), Some(b"Bravo.\n".to_vec()));
    }

    #[test]
    fn test_delete_pair() {
        let (_dir, store) = mock_store();

        store.delete("0000", "Alpha").unwrap();
        assert_eq!(store.get("0000", "alpha").unwrap(), None);
        assert_eq!(raw_get(&store, "0000:bravo"), Some(b"Bravo.\n".to_vec()));

        // Already deleted
        store.delete("0000", "alpha").unwrap();
    }

    #[test]
    fn test_delete_pair_without_bucket() {
        let store = PairStore::new(db::open_in_memory().unwrap());

        store.delete("0000", "alpha").unwrap();
        assert!(!table_exists(&store));
    }

    #[test]
    fn test_pairs_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let store = PairStore::new(db::open(&path).unwrap());
        store.set("0000", "kept", "Kept.").unwrap();
        store.set("0000", "dropped", "Dropped.").unwrap();
        store.delete("0000", "dropped").unwrap();
        drop(store);

        let store = PairStore::new(db::open(&path).unwrap());
        assert_eq!(store.get("0000", "kept").unwrap(), Some("Kept.\n".to_string()));
        assert_eq!(store.get("0000", "dropped").unwrap(), None);
    }

    #[test]
    fn test_concurrent_access() {
        let store = Arc::new(PairStore::new(db::open_in_memory().unwrap()));
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let name = format!("key{}", i);
                let value = format!("value{}", i);
                store_clone.set("0000", &name, &value).unwrap();
                let result = store_clone.get("0000", &name).unwrap();
                assert_eq!(result, Some(format!("{}\n", value)));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..10 {
            let result = store.get("0000", &format!("key{}", i)).unwrap();
            assert_eq!(result, Some(format!("value{}\n", i)));
        }
    }
}
