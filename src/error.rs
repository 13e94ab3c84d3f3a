//! Error types for Gesedels

use thiserror::Error;
use std::io;

/// Result type alias for Gesedels operations
pub type Result<T> = std::result::Result<T, GesedelsError>;

/// Custom error types for Gesedels
#[derive(Error, Debug)]
pub enum GesedelsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for GesedelsError {
    fn from(err: tokio::task::JoinError) -> Self {
        GesedelsError::Task(format!("blocking task failed: {}", err))
    }
}
