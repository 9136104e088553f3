use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use mzbind::config::SchemaConfig;
use mzbind::registry::TypeRegistry;

mod demo;
mod describe;
mod types;
mod validate;

mod config;

/// mzbind - inspect report schemas of registered record types
#[derive(Parser)]
#[command(name = "mzbind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered types
    Types {
        /// TOML schema file (defaults to the built-in demo schema)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },

    /// Show the report columns of a type
    Describe {
        /// Root type, e.g. Peptide or Link<Protein>
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// TOML schema file (defaults to the built-in demo schema)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Maximum column depth
        #[arg(short, long)]
        depth: Option<usize>,

        /// Include advanced and obsolete columns
        #[arg(short, long)]
        all: bool,

        /// Print columns as JSON
        #[arg(long)]
        json: bool,

        /// Split camel-case names into words
        #[arg(long)]
        humanize: bool,
    },

    /// Check a schema file for unknown types, cycles and ineffective attributes
    Validate {
        /// TOML schema file
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Print a small peptide report sorted by one of its columns
    Demo {
        /// Column path to sort by
        #[arg(long, value_name = "PATH", default_value = "Precursor.Mz")]
        sort: String,

        /// Sort in descending order
        #[arg(long)]
        descending: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = log_level(verbosity);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Default log filter for a `-v` count
fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Types { schema } => types::run(schema),
        Commands::Describe {
            type_name,
            schema,
            config,
            depth,
            all,
            json,
            humanize,
        } => describe::run(describe::DescribeArgs {
            type_name,
            schema,
            config,
            depth,
            all,
            json,
            humanize,
        }),
        Commands::Validate { schema } => validate::run(schema),
        Commands::Demo { sort, descending } => demo::run(&sort, descending),
    }
}

/// Loads the registry from a schema file, or the built-in demo schema.
fn load_registry(schema: Option<&Path>) -> Result<TypeRegistry> {
    match schema {
        Some(path) => {
            info!("Loading schema from {}", path.display());
            SchemaConfig::from_file(path)
                .and_then(SchemaConfig::into_registry)
                .with_context(|| format!("Failed to load schema: {}", path.display()))
        }
        None => {
            info!("Using built-in demo schema");
            demo::demo_registry().context("Failed to build demo schema")
        }
    }
}

/// Human-readable label for a schema source
fn source_label(schema: Option<&Path>) -> String {
    schema
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(3), "trace");
        assert_eq!(log_level(7), "trace");
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["mzbind", "-vvv", "types"]).unwrap();
        assert_eq!(log_level(cli.verbosity()), "trace");
    }
}
