//! Gesedels - a namespaced key-value store over plaintext HTTP
//!
//! This library provides:
//! - Case-insensitive `user:name` pair keys with whitespace-normalized values
//! - A transactional pair store backed by a single-file redb database
//! - A plaintext HTTP interface with a uniform error envelope
//! - An async client for talking to a running server

pub mod client;
pub mod db;
pub mod error;
pub mod pair;
pub mod response;
pub mod server;
pub mod store;

pub use error::{GesedelsError, Result};
pub use pair::{derive_key, derive_value, is_private};
pub use store::{PairStore, Store};
pub use client::Client;
pub use server::{GesedelsServer, ServerConfig};
