//! # mzbind
//!
//! Command-line front end for the schema layer.
//!
//! ## Usage
//!
//! ```bash
//! # List the types of a schema file
//! mzbind types --schema peptides.toml
//!
//! # Show the report columns of a type
//! mzbind describe Peptide --schema peptides.toml --humanize
//!
//! # Check a schema file
//! mzbind validate --schema peptides.toml
//!
//! # Sort the built-in peptide report
//! mzbind demo --sort Precursor.Charge --descending
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
