//! Command catalog
//!
//! Every statement the repository sends, as fixed text with named
//! placeholders. The text is the contract with the schema in
//! [`crate::storage::schema`]; values are only ever bound, never spliced.

use super::connection::Command;
use crate::query::{FtsQuery, SearchField};

pub const PARAM_DOCUMENT_NAME: &str = "@DocumentName";
pub const PARAM_CONTENT: &str = "@Content";
pub const PARAM_FTS_QUERY: &str = "@FtsQuery";

pub const INSERT_DOCUMENT: &str =
    "INSERT INTO Documents (DocumentName, Content) VALUES (@DocumentName, @Content)";

pub const DELETE_DOCUMENT: &str = "DELETE FROM Documents WHERE DocumentName = @DocumentName";

// A column on the left of MATCH restricts the FTS5 expression to that column.
pub const SEARCH_CONTENT: &str = r#"
    SELECT d.DocumentName, d.Content
    FROM Documents_fts
    JOIN Documents d ON d.rowid = Documents_fts.rowid
    WHERE Documents_fts.Content MATCH @FtsQuery
    ORDER BY rank
"#;

pub const SEARCH_NAME: &str = r#"
    SELECT d.DocumentName, d.Content
    FROM Documents_fts
    JOIN Documents d ON d.rowid = Documents_fts.rowid
    WHERE Documents_fts.DocumentName MATCH @FtsQuery
    ORDER BY rank
"#;

pub const LIST_NAMES: &str = "SELECT DocumentName FROM Documents ORDER BY DocumentName ASC";

pub fn insert_document(name: &str, content: &str) -> Command {
    Command::new(INSERT_DOCUMENT)
        .bind(PARAM_DOCUMENT_NAME, name)
        .bind(PARAM_CONTENT, content)
}

pub fn delete_document(name: &str) -> Command {
    Command::new(DELETE_DOCUMENT).bind(PARAM_DOCUMENT_NAME, name)
}

pub fn search(field: SearchField, query: &FtsQuery) -> Command {
    let text = match field {
        SearchField::Content => SEARCH_CONTENT,
        SearchField::Name => SEARCH_NAME,
    };
    Command::new(text).bind(PARAM_FTS_QUERY, query.as_str())
}

pub fn list_names() -> Command {
    Command::new(LIST_NAMES)
}
