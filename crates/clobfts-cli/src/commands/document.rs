//! Document command handlers

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use clobfts_core::{DocumentRepository, SearchField, SearchMode};

use crate::input::{read_until_sentinel, CONTENT_SENTINEL};
use crate::output::Output;

/// Add a document
///
/// Content comes from `--content`, `--file`, or standard input up to a
/// line containing only `EOF`.
pub fn add(
    repo: &dyn DocumentRepository,
    name: String,
    content: Option<String>,
    file: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let content = match (content, file) {
        (Some(c), _) => c,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read content file: {:?}", path))?,
        (None, None) => {
            if output.is_interactive() {
                println!(
                    "Enter document content (finish with '{}' on its own line):",
                    CONTENT_SENTINEL
                );
            }
            read_until_sentinel(&mut io::stdin().lock()).context("Failed to read content")?
        }
    };

    repo.add_document(&name, Some(&content))?;
    output.success(&format!("Added document '{}'", name));
    Ok(())
}

/// Delete a document by exact name
pub fn delete(repo: &dyn DocumentRepository, name: String, output: &Output) -> Result<()> {
    repo.delete_document(&name)?;
    output.success(&format!("Deleted document '{}'", name));
    Ok(())
}

/// Search content or names
pub fn search(
    repo: &dyn DocumentRepository,
    field: SearchField,
    query: String,
    phrase: bool,
    output: &Output,
) -> Result<()> {
    let mode = if phrase {
        SearchMode::Phrase
    } else {
        SearchMode::Raw
    };
    let docs = repo.search(field, mode, &query)?;
    output.print_documents(&docs);
    Ok(())
}

/// List all document names
pub fn list(repo: &dyn DocumentRepository, output: &Output) -> Result<()> {
    let names = repo.get_all_document_names()?;
    output.print_names(&names);
    Ok(())
}
