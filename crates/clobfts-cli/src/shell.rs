//! Interactive menu
//!
//! A numbered menu over the repository operations. A failed operation is
//! reported and the loop carries on; only "quit" or end of input stops it.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

use clobfts_core::{DocumentRepository, SearchField, SearchMode};

use crate::input::{prompt, read_until_sentinel, CONTENT_SENTINEL};
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Delete,
    SearchContent,
    SearchName,
    List,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Delete),
            "3" => Some(MenuChoice::SearchContent),
            "4" => Some(MenuChoice::SearchName),
            "5" => Some(MenuChoice::List),
            "6" | "q" | "quit" | "exit" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

const MENU: &str = "\
Choose an option:
  1. Add document
  2. Delete document
  3. Search documents (by content)
  4. Search documents (by name)
  5. List documents
  6. Quit";

/// Run the menu on stdin/stdout
pub fn run(repo: &dyn DocumentRepository, output: &Output) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_with(repo, &mut reader, &mut writer, output)
}

/// Run the menu over arbitrary streams
pub fn run_with<R: BufRead, W: Write>(
    repo: &dyn DocumentRepository,
    reader: &mut R,
    writer: &mut W,
    output: &Output,
) -> Result<()> {
    writeln!(writer, "clobfts - documents with full-text search")?;
    writeln!(writer, "-----------------------------------------")?;

    loop {
        writeln!(writer)?;
        writeln!(writer, "{}", MENU)?;
        let Some(input) = prompt(reader, writer, "Your choice: ")? else {
            break;
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            output.message(writer, "Invalid choice. Try again.")?;
            continue;
        };
        debug!("Menu choice {:?}", choice);

        let result = match choice {
            MenuChoice::Quit => break,
            MenuChoice::Add => add(repo, reader, writer, output),
            MenuChoice::Delete => delete(repo, reader, writer, output),
            MenuChoice::SearchContent => search(repo, SearchField::Content, reader, writer, output),
            MenuChoice::SearchName => search(repo, SearchField::Name, reader, writer, output),
            MenuChoice::List => list(repo, writer, output),
        };

        if let Err(e) = result {
            output.error(&e);
        }
    }

    Ok(())
}

fn add<R: BufRead, W: Write>(
    repo: &dyn DocumentRepository,
    reader: &mut R,
    writer: &mut W,
    output: &Output,
) -> Result<()> {
    let Some(name) = prompt(reader, writer, "Document name: ")? else {
        return Ok(());
    };
    if name.trim().is_empty() {
        output.message(writer, "Document name cannot be empty.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Document content (multiple lines, finish with '{}' on a new line):",
        CONTENT_SENTINEL
    )?;
    writer.flush()?;
    let content = read_until_sentinel(reader)?;

    repo.add_document(&name, Some(&content))?;
    output.write_success(writer, "Document added.")?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(
    repo: &dyn DocumentRepository,
    reader: &mut R,
    writer: &mut W,
    output: &Output,
) -> Result<()> {
    let names = repo.get_all_document_names()?;
    if names.is_empty() {
        output.message(writer, "No documents in the store.")?;
        return Ok(());
    }

    writeln!(writer, "Available documents:")?;
    for name in &names {
        writeln!(writer, "- {}", name)?;
    }

    let Some(name) = prompt(reader, writer, "\nName of the document to delete: ")? else {
        return Ok(());
    };
    if name.trim().is_empty() {
        output.message(writer, "Document name cannot be empty.")?;
        return Ok(());
    }

    repo.delete_document(&name)?;
    output.write_success(writer, &format!("Document '{}' deleted.", name))?;
    Ok(())
}

fn search<R: BufRead, W: Write>(
    repo: &dyn DocumentRepository,
    field: SearchField,
    reader: &mut R,
    writer: &mut W,
    output: &Output,
) -> Result<()> {
    let label = match field {
        SearchField::Content => "Search content for: ",
        SearchField::Name => "Search names for: ",
    };
    let Some(query) = prompt(reader, writer, label)? else {
        return Ok(());
    };
    if query.trim().is_empty() {
        output.message(writer, "Search query cannot be empty.")?;
        return Ok(());
    }

    let Some(mode_input) = prompt(reader, writer, "Mode [raw/phrase] (raw): ")? else {
        return Ok(());
    };
    let mode = if mode_input.trim().is_empty() {
        SearchMode::Raw
    } else {
        match mode_input.parse::<SearchMode>() {
            Ok(mode) => mode,
            Err(msg) => {
                output.message(writer, &msg)?;
                return Ok(());
            }
        }
    };

    let docs = repo.search(field, mode, &query)?;
    output.write_documents(writer, &docs)?;
    Ok(())
}

fn list<W: Write>(repo: &dyn DocumentRepository, writer: &mut W, output: &Output) -> Result<()> {
    let names = repo.get_all_document_names()?;
    output.write_names(writer, &names)?;
    Ok(())
}
