//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and edit a JSON configuration store.
#[derive(Parser, Debug)]
#[command(name = "config-store", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file. A leading `~` is expanded.
    #[arg(
        short,
        long,
        default_value = "~/.config/config-store/config.json",
        env = "CONFIG_STORE_PATH",
        global = true
    )]
    pub config: String,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Value type used when reading or writing a key.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Uint32,
    Bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value stored under a key.
    Get {
        /// The key to read.
        key: String,

        /// Type to read the value as.
        #[arg(short, long, value_enum, default_value = "string")]
        kind: ValueKind,

        /// Value printed when the key is absent.
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Store a value under a key and save the file.
    Set {
        /// The key to write.
        key: String,

        /// The value to store.
        value: String,

        /// Type to store the value as.
        #[arg(short, long, value_enum, default_value = "string")]
        kind: ValueKind,
    },

    /// Remove a key and save the file.
    Unset {
        /// The key to remove.
        key: String,
    },

    /// Print the whole configuration document.
    Show,

    /// Check that the configuration file loads.
    Validate,
}
