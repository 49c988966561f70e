//! SQLite FTS5 backend
//!
//! [`SqliteConnectionSource`] opens a new `rusqlite::Connection` for every
//! repository operation. There is no pooling; a connection lives exactly as
//! long as the operation that asked for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, ToSql};
use tracing::{debug, info};

use crate::config::Config;
use crate::storage::connection::{Command, ConnectionSource, Row, StoreConnection};
use crate::storage::error::{RepositoryError, RepositoryResult, StorageError, StorageResult};
use crate::storage::schema::{init_schema, needs_init};

/// Default time a connection waits on a locked database
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Connection source backed by a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteConnectionSource {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteConnectionSource {
    /// Open the database at `path`, creating it and its schema if needed
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open the database described by the configuration
    pub fn open_with_config(config: &Config) -> RepositoryResult<Self> {
        Self::open_with_timeout(config.database_path(), config.busy_timeout())
    }

    pub fn open_with_timeout(
        path: impl Into<PathBuf>,
        busy_timeout: Duration,
    ) -> RepositoryResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(RepositoryError::empty(
                "path",
                "Database path cannot be empty.",
            ));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
        }

        let source = Self { path, busy_timeout };

        let conn = source.open_connection()?;
        if needs_init(&conn) {
            info!("Initializing document schema at {:?}", source.path);
            init_schema(&conn).map_err(StorageError::from)?;
        }

        Ok(source)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_connection(&self) -> StorageResult<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }
}

impl ConnectionSource for SqliteConnectionSource {
    type Connection = SqliteConnection;

    fn connect(&self) -> StorageResult<SqliteConnection> {
        debug!("Opening connection to {:?}", self.path);
        Ok(SqliteConnection {
            conn: self.open_connection()?,
        })
    }
}

/// One open SQLite connection; closed on drop
pub struct SqliteConnection {
    conn: Connection,
}

fn named_params(command: &Command) -> Vec<(&str, &dyn ToSql)> {
    command
        .params()
        .iter()
        .map(|p| (p.name, &p.value as &dyn ToSql))
        .collect()
}

impl StoreConnection for SqliteConnection {
    fn execute(&mut self, command: &Command) -> StorageResult<usize> {
        let params = named_params(command);
        let mut stmt = self.conn.prepare(command.text())?;
        Ok(stmt.execute(params.as_slice())?)
    }

    fn query(&mut self, command: &Command) -> StorageResult<Vec<Row>> {
        let params = named_params(command);
        let mut stmt = self.conn.prepare(command.text())?;
        let column_count = stmt.column_count();

        let mut rows = stmt.query(params.as_slice())?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut columns = Vec::with_capacity(column_count);
            for i in 0..column_count {
                columns.push(row.get::<_, String>(i)?);
            }
            result.push(Row::new(columns));
        }

        Ok(result)
    }
}
