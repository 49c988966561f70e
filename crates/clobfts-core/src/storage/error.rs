//! Storage error handling
//!
//! Two layers of errors:
//!
//! - [`StorageError`]: anything the backing store or its connection layer
//!   reports. Classification helpers describe the failure without changing it.
//! - [`RepositoryError`]: what repository operations return. Argument
//!   validation and missing-row conditions are distinguished from storage
//!   failures, which pass through unwrapped.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the backing store or the connection layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the database directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A result row had fewer columns than the caller addressed
    #[error("Result row has no column at index {index}")]
    MissingColumn { index: usize },

    /// Failure reported by a non-SQLite backend
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Columns the fixed commands reference; a missing one is a schema fault
const SCHEMA_COLUMNS: &[&str] = &["documentname", "content", "rowid", "rank"];

/// A `column:term` filter in a match expression named a column the FTS
/// table does not have. Qualified or schema-owned names point at the schema.
fn is_unknown_filter_column(msg: &str) -> bool {
    let Some(at) = msg.find("no such column: ") else {
        return false;
    };
    let column = msg[at + "no such column: ".len()..].trim();
    !column.is_empty() && !column.contains('.') && !SCHEMA_COLUMNS.contains(&column)
}

impl StorageError {
    /// Create an error from an I/O error with path context
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::CreateDirectory {
                path,
                source: error,
            },
        }
    }

    /// True when the store rejected a row because of a uniqueness or other
    /// constraint (e.g. adding a document whose name already exists)
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }

    /// True when the FTS engine could not parse the match expression
    pub fn is_query_syntax_error(&self) -> bool {
        match self {
            StorageError::Database(rusqlite::Error::SqliteFailure(_, Some(message))) => {
                let msg = message.to_lowercase();
                (msg.contains("fts5") && msg.contains("syntax"))
                    || msg.contains("malformed match expression")
                    || msg.contains("unterminated string")
                    || is_unknown_filter_column(&msg)
            }
            _ => false,
        }
    }

    /// True when the database was locked by another process
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            StorageError::Database(rusqlite::Error::SqliteFailure(err, _))
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }

    /// Check if the caller can fix this error and try again
    pub fn is_recoverable(&self) -> bool {
        self.is_busy()
            || self.is_constraint_violation()
            || self.is_query_syntax_error()
            || matches!(self, StorageError::PermissionDenied { .. })
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        if self.is_constraint_violation() {
            return Some("A document with this name already exists. Delete it first or pick another name.");
        }
        if self.is_query_syntax_error() {
            return Some("Check the full-text query syntax, or search with --phrase to match the text literally.");
        }
        if self.is_busy() {
            return Some("Another process is writing to the database. Try again in a moment.");
        }
        match self {
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions for the database location.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Result type for backing-store calls
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by document repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Caller supplied an empty or whitespace-only value
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument {
        argument: &'static str,
        message: &'static str,
    },

    /// Document content was absent (an empty string is fine)
    #[error("Document content must be provided")]
    MissingContent,

    /// Delete targeted a name with no matching row
    #[error("Document with name '{name}' not found")]
    NotFound { name: String },

    /// Any failure from the backing store
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    pub(crate) fn empty(argument: &'static str, message: &'static str) -> Self {
        RepositoryError::InvalidArgument { argument, message }
    }

    /// True for errors detected before any I/O
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            RepositoryError::InvalidArgument { .. } | RepositoryError::MissingContent
        )
    }

    /// The underlying storage error, if this is one
    pub fn storage(&self) -> Option<&StorageError> {
        match self {
            RepositoryError::Storage(err) => Some(err),
            _ => None,
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            RepositoryError::NotFound { .. } => {
                Some("Run `clobfts list` to see the stored document names.")
            }
            RepositoryError::Storage(err) => err.recovery_suggestion(),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(value: rusqlite::Error) -> Self {
        RepositoryError::Storage(StorageError::Database(value))
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
