//! Config Store - a thread-safe key/value configuration store persisted as JSON.
//!
//! The library centres on [`ConfigStore`]: a JSON object kept in memory behind
//! a single lock, with typed accessors that fall back to caller-supplied
//! defaults and explicit `load`/`save` against one file on disk. The binary
//! built from this crate is a small administrative front end over the same
//! store.

pub mod cli;
pub mod config;
pub mod error;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::cli::{Cli, Commands, ValueKind};
pub use crate::config::{ConfigStore, SharedConfig, StoreState};
pub use crate::error::ConfigError;

/// Runs the command described by the CLI arguments.
pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    let path = cli.config.as_str();
    match cli.command {
        Commands::Get { key, kind, default } => get_value(path, &key, kind, default.as_deref()),
        Commands::Set { key, value, kind } => set_value(path, &key, &value, kind),
        Commands::Unset { key } => unset_value(path, &key),
        Commands::Show => show_config(path),
        Commands::Validate => validate_config(path),
    }
}

/// Initializes the tracing subscriber for structured logging.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Opens the store, treating a missing file as an empty document.
fn open_store(path: &str) -> Result<SharedConfig> {
    config::open_shared(path).context("Failed to load configuration")
}

/// Prints the value under `key`, read as `kind`.
fn get_value(path: &str, key: &str, kind: ValueKind, default: Option<&str>) -> Result<()> {
    let store = open_store(path)?;

    let rendered = match kind {
        ValueKind::String => store.get_string(key, default.unwrap_or_default()),
        ValueKind::Uint32 => {
            let default = default.map(parse_uint32).transpose()?.unwrap_or(0);
            store.get_uint32(key, default).to_string()
        }
        ValueKind::Bool => {
            let default = default.map(parse_bool).transpose()?.unwrap_or(false);
            store.get_bool(key, default).to_string()
        }
    };

    println!("{}", rendered);
    Ok(())
}

/// Stores `value` under `key` as `kind` and saves the file.
fn set_value(path: &str, key: &str, value: &str, kind: ValueKind) -> Result<()> {
    if key.is_empty() {
        anyhow::bail!("Key must not be empty");
    }

    let store = open_store(path)?;

    match kind {
        ValueKind::String => store.set_string(key, value),
        ValueKind::Uint32 => store.set_uint32(key, parse_uint32(value)?),
        ValueKind::Bool => store.set_bool(key, parse_bool(value)?),
    }

    store.try_save().context("Failed to save configuration")?;
    info!(key, path = %store.path().display(), "Configuration updated");
    Ok(())
}

/// Removes `key` and saves the file.
fn unset_value(path: &str, key: &str) -> Result<()> {
    let store = open_store(path)?;

    if !store.remove(key) {
        println!("Key '{}' is not set.", key);
        return Ok(());
    }

    store.try_save().context("Failed to save configuration")?;
    info!(key, path = %store.path().display(), "Configuration key removed");
    Ok(())
}

/// Displays the parsed configuration.
fn show_config(path: &str) -> Result<()> {
    let store = open_store(path)?;
    let json = serde_json::to_string_pretty(&store.snapshot())?;
    println!("{}", json);
    Ok(())
}

/// Loads the configuration file and reports what it holds.
fn validate_config(path: &str) -> Result<()> {
    let store = ConfigStore::new(path);
    store.try_load().context("Configuration is invalid")?;

    println!("Configuration is valid.");
    println!("Found {} key(s) in {}", store.len(), store.path().display());
    Ok(())
}

fn parse_uint32(value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid unsigned 32-bit integer", value))
}

fn parse_bool(value: &str) -> Result<bool> {
    config::value::parse_bool(value).ok_or_else(|| anyhow!("'{}' is not a valid boolean", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uint32_accepts_padding() {
        assert_eq!(parse_uint32(" 80 ").unwrap(), 80);
        assert!(parse_uint32("-1").is_err());
        assert!(parse_uint32("loud").is_err());
    }

    #[test]
    fn parse_bool_rejects_unknown() {
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn set_then_get_through_commands() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let path = path.to_str().unwrap();

        set_value(path, "volume", "80", ValueKind::Uint32).unwrap();
        set_value(path, "shuffle", "true", ValueKind::Bool).unwrap();

        let store = ConfigStore::new(path);
        assert!(store.load());
        assert_eq!(store.get_uint32("volume", 0), 80);
        assert!(store.get_bool("shuffle", false));

        unset_value(path, "volume").unwrap();
        assert!(store.load());
        assert!(!store.contains("volume"));
    }

    #[test]
    fn set_rejects_bad_value() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_value(path.to_str().unwrap(), "volume", "loud", ValueKind::Uint32).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn validate_reports_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"a": }"#).unwrap();

        assert!(validate_config(path.to_str().unwrap()).is_err());
    }
}
