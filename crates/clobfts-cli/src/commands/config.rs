//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use clobfts_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "database_path": config.database_path(),
                    "busy_timeout_ms": config.busy_timeout_ms,
                    "log_level": config.log_level,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.database_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:        {}", config.data_dir.display());
            println!("  database_path:   {}", config.database_path().display());
            println!("  busy_timeout_ms: {}", config.busy_timeout_ms);
            println!(
                "  log_level:       {}",
                config.log_level.as_deref().unwrap_or("(not set)")
            );
            println!(
                "  log_file:        {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "database_path" => {
            config.database_path = optional(value).map(PathBuf::from);
        }
        "busy_timeout_ms" => {
            config.busy_timeout_ms = value
                .parse()
                .context("Invalid value for busy_timeout_ms. Use a number of milliseconds.")?;
        }
        "log_level" => {
            config.log_level = optional(value);
        }
        "log_file" => {
            config.log_file = optional(value).map(PathBuf::from);
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, database_path, busy_timeout_ms, log_level, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "database_path", "/tmp/docs.db").unwrap();
        apply(&mut config, "busy_timeout_ms", "750").unwrap();
        apply(&mut config, "log_level", "debug").unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/docs.db")));
        assert_eq!(config.busy_timeout_ms, 750);
        assert_eq!(config.log_level.as_deref(), Some("debug"));

        apply(&mut config, "database_path", "none").unwrap();
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply(&mut config, "busy_timeout_ms", "later").is_err());
        let err = apply(&mut config, "colour", "blue").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }
}
