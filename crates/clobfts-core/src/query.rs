//! Full-text query construction
//!
//! Two modes, never mixed implicitly:
//!
//! - **Raw**: the text is the FTS5 expression and is sent unchanged, so
//!   callers can use phrases, `AND`/`OR`/`NOT` and prefix `*` queries.
//! - **Phrase**: the text is wrapped in double quotes with embedded quotes
//!   doubled, so the engine matches it as one literal phrase.
//!
//! Both reject empty or whitespace-only input before anything is sent.

use std::fmt;
use std::str::FromStr;

use crate::storage::error::{RepositoryError, RepositoryResult};

/// Which document field a search predicate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Content,
    Name,
}

impl SearchField {
    /// Argument name used in validation errors
    fn argument(self) -> &'static str {
        match self {
            SearchField::Content => "query",
            SearchField::Name => "name_query",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            SearchField::Content => "Search query cannot be empty.",
            SearchField::Name => "Document name query cannot be empty.",
        }
    }
}

/// How user input becomes an FTS expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Pass the input through as native FTS syntax
    #[default]
    Raw,
    /// Match the input as a single literal phrase
    Phrase,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Raw => write!(f, "raw"),
            SearchMode::Phrase => write!(f, "phrase"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "r" => Ok(SearchMode::Raw),
            "phrase" | "p" => Ok(SearchMode::Phrase),
            other => Err(format!(
                "Unknown search mode '{}'. Use 'raw' or 'phrase'.",
                other
            )),
        }
    }
}

/// A validated FTS match expression, ready to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtsQuery {
    expression: String,
    mode: SearchMode,
}

impl FtsQuery {
    /// Use `text` as the FTS expression, unchanged
    pub fn raw(text: &str) -> RepositoryResult<Self> {
        Self::build(text, SearchMode::Raw, SearchField::Content)
    }

    /// Treat `text` as one literal phrase
    pub fn phrase(text: &str) -> RepositoryResult<Self> {
        Self::build(text, SearchMode::Phrase, SearchField::Content)
    }

    /// Build a query for `field`; validation errors name the field's argument
    pub fn build(text: &str, mode: SearchMode, field: SearchField) -> RepositoryResult<Self> {
        if text.trim().is_empty() {
            return Err(RepositoryError::empty(
                field.argument(),
                field.empty_message(),
            ));
        }

        let expression = match mode {
            SearchMode::Raw => text.to_string(),
            SearchMode::Phrase => escape_phrase(text.trim()),
        };

        Ok(Self { expression, mode })
    }

    /// The expression bound to the query parameter
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }
}

/// Wrap `text` in double quotes, doubling any embedded quote
pub fn escape_phrase(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
