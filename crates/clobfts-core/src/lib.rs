//! clobfts Core Library
//!
//! Named text documents with full-text retrieval by content or by name.
//! Matching and ranking are delegated to SQLite FTS5; this crate shapes the
//! queries, validates input and classifies failures.
//!
//! # Quick Start
//!
//! ```text
//! let source = SqliteConnectionSource::open("docs.db")?;
//! let repo = SqlDocumentRepository::new(source);
//!
//! repo.add_document("Doc1", Some("alpha beta"))?;
//! let hits = repo.search_documents("alpha")?;
//! let phrase_hits = repo.search_documents_by_name_phrase("User Guide")?;
//! ```
//!
//! # Modules
//!
//! - `repository`: the document repository contract and its implementation
//! - `query`: raw and phrase FTS query construction
//! - `models`: the `Document` record
//! - `storage`: backing-store protocol, SQLite backend, schema, errors
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod query;
pub mod repository;
pub mod storage;

pub use config::Config;
pub use models::Document;
pub use query::{escape_phrase, FtsQuery, SearchField, SearchMode};
pub use repository::{DocumentRepository, SqlDocumentRepository};
pub use storage::{
    ConnectionSource, RepositoryError, RepositoryResult, SqliteConnectionSource, StorageError,
    StoreConnection,
};
