//! Data models
//!
//! A document is a unique name plus its text content. There is no update:
//! changing a document means deleting it and adding it again.

use serde::{Deserialize, Serialize};

/// A named text document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, non-empty name
    pub name: String,
    /// Text content, possibly empty
    pub content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl From<(String, String)> for Document {
    fn from((name, content): (String, String)) -> Self {
        Self { name, content }
    }
}
