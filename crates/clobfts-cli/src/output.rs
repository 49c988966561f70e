//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::io::{self, Write};

use clobfts_core::{Document, RepositoryError};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if we should print prompts and menus
    pub fn is_interactive(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print search results with full content
    pub fn print_documents(&self, docs: &[Document]) {
        let _ = self.write_documents(&mut io::stdout().lock(), docs);
    }

    /// Render search results with full content
    pub fn write_documents<W: Write>(&self, w: &mut W, docs: &[Document]) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => {
                if docs.is_empty() {
                    return writeln!(w, "No documents found.");
                }
                for doc in docs {
                    writeln!(w, "---")?;
                    writeln!(w, "Name:")?;
                    writeln!(w, "{}", doc.name)?;
                    writeln!(w, "Content:")?;
                    writeln!(w, "{}", doc.content.trim_end_matches('\n'))?;
                    writeln!(w, "---")?;
                }
                writeln!(w, "\n{} document(s)", docs.len())
            }
            OutputFormat::Json => writeln!(w, "{}", json_string(docs)),
            OutputFormat::Quiet => {
                for doc in docs {
                    writeln!(w, "{}", doc.name)?;
                }
                Ok(())
            }
        }
    }

    /// Print a list of document names
    pub fn print_names(&self, names: &[String]) {
        let _ = self.write_names(&mut io::stdout().lock(), names);
    }

    pub fn write_names<W: Write>(&self, w: &mut W, names: &[String]) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => {
                if names.is_empty() {
                    return writeln!(w, "No documents in the store.");
                }
                for name in names {
                    writeln!(w, "- {}", name)?;
                }
                writeln!(w, "\n{} document(s)", names.len())
            }
            OutputFormat::Json => writeln!(w, "{}", json_string(names)),
            OutputFormat::Quiet => {
                for name in names {
                    writeln!(w, "{}", name)?;
                }
                Ok(())
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        let _ = self.write_success(&mut io::stdout().lock(), message);
    }

    pub fn write_success<W: Write>(&self, w: &mut W, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => writeln!(w, "✓ {}", message),
            OutputFormat::Json => writeln!(
                w,
                "{}",
                serde_json::json!({"status": "success", "message": message})
            ),
            OutputFormat::Quiet => Ok(()),
        }
    }

    /// Write an informational message (dropped in quiet mode)
    pub fn message<W: Write>(&self, w: &mut W, msg: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => writeln!(w, "{}", msg),
            OutputFormat::Json => writeln!(w, "{}", serde_json::json!({"message": msg})),
            OutputFormat::Quiet => Ok(()),
        }
    }

    /// Report a failed operation without aborting
    pub fn error(&self, err: &anyhow::Error) {
        let suggestion = err
            .downcast_ref::<RepositoryError>()
            .and_then(RepositoryError::recovery_suggestion);

        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "message": format!("{:#}", err),
                        "suggestion": suggestion
                    })
                );
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                eprintln!("✗ Error: {:#}", err);
                if let Some(hint) = suggestion {
                    if self.format == OutputFormat::Human {
                        eprintln!("  {}", hint);
                    }
                }
            }
        }
    }
}

fn json_string<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        serde_json::json!({"status": "error", "message": e.to_string()}).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_json_string_documents() {
        let docs = vec![Document::new("Doc1", "alpha")];
        let parsed: serde_json::Value = serde_json::from_str(&json_string(&docs)).unwrap();
        assert_eq!(parsed[0]["name"], "Doc1");
        assert_eq!(parsed[0]["content"], "alpha");
    }

    fn render(format: OutputFormat, f: impl Fn(&Output, &mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&Output::new(format), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_documents_show_name_and_content() {
        let docs = vec![Document::new("Doc1", "alpha beta\n")];
        let text = render(OutputFormat::Human, |o, w| o.write_documents(w, &docs));

        assert!(text.contains("Name:\nDoc1\nContent:\nalpha beta\n---"));
        assert!(text.ends_with("1 document(s)\n"));
        assert_eq!(
            render(OutputFormat::Human, |o, w| o.write_documents(w, &[])),
            "No documents found.\n"
        );
    }

    #[test]
    fn test_quiet_names_one_per_line() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(
            render(OutputFormat::Quiet, |o, w| o.write_names(w, &names)),
            "Alpha\nBeta\n"
        );
    }

    #[test]
    fn test_message_respects_format() {
        assert_eq!(
            render(OutputFormat::Human, |o, w| o.message(w, "hello")),
            "hello\n"
        );
        assert_eq!(render(OutputFormat::Quiet, |o, w| o.message(w, "hello")), "");

        let json = render(OutputFormat::Json, |o, w| o.message(w, "hello"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["message"], "hello");
    }

    #[test]
    fn test_only_human_is_interactive() {
        assert!(Output::new(OutputFormat::Human).is_interactive());
        assert!(!Output::new(OutputFormat::Json).is_interactive());
        assert!(!Output::new(OutputFormat::Quiet).is_interactive());
    }
}
