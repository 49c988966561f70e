//! Storage layer
//!
//! The backing-store protocol and its SQLite FTS5 implementation.
//!
//! ## Layout
//!
//! - `connection`: the `ConnectionSource` / `StoreConnection` traits
//! - `command`: fixed command templates with named placeholders
//! - `sqlite`: SQLite backend, one connection per operation
//! - `schema`: `Documents` table and its FTS5 index
//! - `error`: storage and repository errors

pub mod command;
pub mod connection;
pub mod error;
pub mod schema;
pub mod sqlite;

pub use connection::{Command, ConnectionSource, Param, Row, StoreConnection};
pub use error::{RepositoryError, RepositoryResult, StorageError, StorageResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
pub use sqlite::{SqliteConnection, SqliteConnectionSource};
