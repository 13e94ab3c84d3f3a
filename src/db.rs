//! Database handle management
//!
//! Opens the single-file redb database that backs the pair store, or an
//! in-memory one for tests and throwaway servers.

use crate::error::Result;
use redb::backends::InMemoryBackend;
use redb::Database;
use std::path::Path;

/// Create or open the database file at `path`, creating parent directories as needed.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Database> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Database::create(path)?)
}

/// Create an empty database that lives only in memory.
pub fn open_in_memory() -> Result<Database> {
    Ok(Database::builder().create_with_backend(InMemoryBackend::new())?)
}
