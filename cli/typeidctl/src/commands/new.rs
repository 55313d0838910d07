//! ID generation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use typesafe_id::TypeId;

use crate::output::{print_lines, OutputFormat};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Prefix for the new IDs; empty for none.
    #[arg(default_value = "")]
    prefix: String,

    /// Number of IDs to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Timestamp to embed (RFC 3339) instead of the current time.
    #[arg(long)]
    at: Option<DateTime<Utc>>,
}

pub fn run(args: NewArgs, format: OutputFormat) -> Result<()> {
    let ids = (0..args.count)
        .map(|_| match args.at {
            Some(at) => TypeId::new_at(args.prefix.as_str(), at),
            None => TypeId::new(args.prefix.as_str()),
        })
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("cannot generate IDs with prefix '{}'", args.prefix))?;

    tracing::debug!(count = ids.len(), prefix = %args.prefix, "generated IDs");
    print_lines(&ids, format);
    Ok(())
}
