//! Backing-store protocol
//!
//! The repository talks to the store through two small traits:
//!
//! - [`ConnectionSource`] hands out a fresh connection per operation
//! - [`StoreConnection`] runs one [`Command`] for effect or for rows
//!
//! Connections are released when dropped, so every exit path of an
//! operation gives the connection back.

use crate::storage::error::{StorageError, StorageResult};

/// A named parameter bound to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Placeholder name including its sigil, e.g. `@DocumentName`
    pub name: &'static str,
    pub value: String,
}

/// Fixed command text plus bound parameter values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: &'static str,
    params: Vec<Param>,
}

impl Command {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            params: Vec::new(),
        }
    }

    /// Bind a value to a named placeholder
    pub fn bind(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push(Param {
            name,
            value: value.into(),
        });
        self
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Look up a bound value by placeholder name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// One result row: ordered, positionally addressed string columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    columns: Vec<String>,
}

impl Row {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Get the column at `index`
    pub fn get(&self, index: usize) -> StorageResult<&str> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or(StorageError::MissingColumn { index })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Take ownership of the column at `index`
    pub fn take(&mut self, index: usize) -> StorageResult<String> {
        self.columns
            .get_mut(index)
            .map(std::mem::take)
            .ok_or(StorageError::MissingColumn { index })
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A single open connection to the backing store
pub trait StoreConnection {
    /// Execute a command for effect, returning the number of affected rows
    fn execute(&mut self, command: &Command) -> StorageResult<usize>;

    /// Execute a command and collect its result rows in engine order
    fn query(&mut self, command: &Command) -> StorageResult<Vec<Row>>;
}

/// Factory for store connections
///
/// Any `Fn() -> StorageResult<C>` closure is a connection source, which
/// makes it easy to substitute a fake store in tests.
pub trait ConnectionSource {
    type Connection: StoreConnection;

    fn connect(&self) -> StorageResult<Self::Connection>;
}

impl<F, C> ConnectionSource for F
where
    F: Fn() -> StorageResult<C>,
    C: StoreConnection,
{
    type Connection = C;

    fn connect(&self) -> StorageResult<C> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_binds_in_order() {
        let cmd = Command::new("INSERT INTO t (a, b) VALUES (@A, @B)")
            .bind("@A", "first")
            .bind("@B", String::from("second"));

        assert_eq!(cmd.params().len(), 2);
        assert_eq!(cmd.params()[0].name, "@A");
        assert_eq!(cmd.param("@B"), Some("second"));
        assert_eq!(cmd.param("@C"), None);
    }

    #[test]
    fn test_row_positional_access() {
        let mut row: Row = ["Doc1", "alpha beta"].into_iter().collect();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get(0).unwrap(), "Doc1");
        assert!(matches!(
            row.get(2),
            Err(StorageError::MissingColumn { index: 2 })
        ));
        assert_eq!(row.take(1).unwrap(), "alpha beta");
    }
}
