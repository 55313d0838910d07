//! CLI commands.

mod check_prefix;
mod inspect;
mod new;
mod sort;

use anyhow::Result;
use clap::{Parser, Subcommand};
use typesafe_id::ordering::set_default_order;
use typesafe_id::IdOrder;

use crate::config::Config;
use crate::output::OutputFormat;

/// typeidctl - Mint, inspect and sort type-prefixed, time-ordered IDs.
#[derive(Debug, Parser)]
#[command(name = "tid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Order used when sorting IDs (lex or timestamp).
    ///
    /// Overrides TYPEID_DEFAULT_ORDER.
    #[arg(long, global = true)]
    order: Option<IdOrder>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new IDs.
    New(new::NewArgs),

    /// Parse IDs and show their parts.
    Inspect(inspect::InspectArgs),

    /// Check a prefix against the naming rules.
    CheckPrefix(check_prefix::CheckPrefixArgs),

    /// Sort IDs given as arguments or on stdin.
    Sort(sort::SortArgs),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: &Config) -> Result<()> {
        // Configure once, before any comparison happens.
        let order = self.order.unwrap_or(config.default_order);
        set_default_order(order);

        match self.command {
            Commands::New(args) => new::run(args, self.format),
            Commands::Inspect(args) => inspect::run(args, self.format),
            Commands::CheckPrefix(args) => check_prefix::run(args),
            Commands::Sort(args) => sort::run(args, self.format),
        }
    }
}
