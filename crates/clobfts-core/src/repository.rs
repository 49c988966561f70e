//! Document repository
//!
//! [`DocumentRepository`] is the contract the front ends use: add, delete,
//! search by content, search by name, list names. [`SqlDocumentRepository`]
//! implements it on top of any [`ConnectionSource`].
//!
//! Every operation validates its arguments before touching the store, then
//! opens one connection, sends one command from the catalog, and drops the
//! connection on the way out.

use tracing::{debug, warn};

use crate::models::Document;
use crate::query::{FtsQuery, SearchField, SearchMode};
use crate::storage::command;
use crate::storage::connection::{ConnectionSource, Row, StoreConnection};
use crate::storage::error::{RepositoryError, RepositoryResult};

/// Operations on the document store
pub trait DocumentRepository {
    /// Insert a document. `None` content is rejected; empty content is fine.
    fn add_document(&self, name: &str, content: Option<&str>) -> RepositoryResult<()>;

    /// Delete the document with exactly this name
    fn delete_document(&self, name: &str) -> RepositoryResult<()>;

    /// Search content with a native FTS expression
    fn search_documents(&self, query: &str) -> RepositoryResult<Vec<Document>>;

    /// Search names with a native FTS expression
    fn search_documents_by_name(&self, name_query: &str) -> RepositoryResult<Vec<Document>>;

    /// All document names, ascending
    fn get_all_document_names(&self) -> RepositoryResult<Vec<String>>;

    /// Search content for `text` as one literal phrase
    fn search_documents_phrase(&self, text: &str) -> RepositoryResult<Vec<Document>> {
        let query = FtsQuery::build(text, SearchMode::Phrase, SearchField::Content)?;
        self.search_documents(query.as_str())
    }

    /// Search names for `text` as one literal phrase
    fn search_documents_by_name_phrase(&self, text: &str) -> RepositoryResult<Vec<Document>> {
        let query = FtsQuery::build(text, SearchMode::Phrase, SearchField::Name)?;
        self.search_documents_by_name(query.as_str())
    }

    /// Search `field` using the given mode
    fn search(
        &self,
        field: SearchField,
        mode: SearchMode,
        text: &str,
    ) -> RepositoryResult<Vec<Document>> {
        match (field, mode) {
            (SearchField::Content, SearchMode::Raw) => self.search_documents(text),
            (SearchField::Content, SearchMode::Phrase) => self.search_documents_phrase(text),
            (SearchField::Name, SearchMode::Raw) => self.search_documents_by_name(text),
            (SearchField::Name, SearchMode::Phrase) => self.search_documents_by_name_phrase(text),
        }
    }
}

/// Repository that sends catalog commands through a connection source
pub struct SqlDocumentRepository<S> {
    source: S,
}

impl<S: ConnectionSource> SqlDocumentRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get the connection source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn search_field(&self, field: SearchField, text: &str) -> RepositoryResult<Vec<Document>> {
        let query = FtsQuery::build(text, SearchMode::Raw, field)?;
        debug!("Searching {:?} for {:?}", field, query.as_str());

        let mut conn = self.source.connect()?;
        let rows = conn.query(&command::search(field, &query)).map_err(|e| {
            warn!("Search failed: {}", e);
            e
        })?;

        let documents = rows
            .into_iter()
            .map(document_from_row)
            .collect::<RepositoryResult<Vec<_>>>()?;
        debug!("Search matched {} document(s)", documents.len());
        Ok(documents)
    }
}

fn document_from_row(mut row: Row) -> RepositoryResult<Document> {
    let name = row.take(0)?;
    let content = row.take(1)?;
    Ok(Document { name, content })
}

fn require_name(name: &str) -> RepositoryResult<()> {
    if name.trim().is_empty() {
        return Err(RepositoryError::empty(
            "name",
            "Document name cannot be empty.",
        ));
    }
    Ok(())
}

impl<S: ConnectionSource> DocumentRepository for SqlDocumentRepository<S> {
    fn add_document(&self, name: &str, content: Option<&str>) -> RepositoryResult<()> {
        require_name(name)?;
        let content = content.ok_or(RepositoryError::MissingContent)?;

        debug!("Adding document {:?} ({} bytes)", name, content.len());
        let mut conn = self.source.connect()?;
        conn.execute(&command::insert_document(name, content))
            .map_err(|e| {
                warn!("Failed to add document {:?}: {}", name, e);
                e
            })?;
        Ok(())
    }

    fn delete_document(&self, name: &str) -> RepositoryResult<()> {
        require_name(name)?;

        debug!("Deleting document {:?}", name);
        let mut conn = self.source.connect()?;
        let affected = conn.execute(&command::delete_document(name))?;
        if affected == 0 {
            warn!("Delete matched no document named {:?}", name);
            return Err(RepositoryError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn search_documents(&self, query: &str) -> RepositoryResult<Vec<Document>> {
        self.search_field(SearchField::Content, query)
    }

    fn search_documents_by_name(&self, name_query: &str) -> RepositoryResult<Vec<Document>> {
        self.search_field(SearchField::Name, name_query)
    }

    fn get_all_document_names(&self) -> RepositoryResult<Vec<String>> {
        let mut conn = self.source.connect()?;
        let rows = conn.query(&command::list_names())?;

        rows.into_iter()
            .map(|mut row| row.take(0).map_err(RepositoryError::from))
            .collect()
    }
}
