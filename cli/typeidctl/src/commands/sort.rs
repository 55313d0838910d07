//! Sorting IDs.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Args;
use typesafe_id::ordering::default_order;
use typesafe_id::{IdOrder, TypeId};

use crate::error::CliError;
use crate::output::{print_lines, OutputFormat};

#[derive(Debug, Args)]
pub struct SortArgs {
    /// IDs to sort. Read from stdin, one per line, when omitted.
    ids: Vec<String>,

    /// Sort in descending order.
    #[arg(short, long)]
    reverse: bool,
}

pub fn run(args: SortArgs, format: OutputFormat) -> Result<()> {
    let raw = if args.ids.is_empty() {
        read_stdin()?
    } else {
        args.ids
    };

    let mut ids = sort_ids(raw, default_order())?;
    if args.reverse {
        ids.reverse();
    }

    print_lines(&ids, format);
    Ok(())
}

/// Parses every input and sorts the IDs under `order`.
fn sort_ids(raw: Vec<String>, order: IdOrder) -> Result<Vec<TypeId>> {
    if raw.is_empty() {
        return Err(CliError::NoInput.into());
    }

    let mut ids = raw
        .iter()
        .map(|s| TypeId::parse(s).with_context(|| format!("invalid ID '{s}'")))
        .collect::<Result<Vec<_>>>()?;
    ids.sort_by(|a, b| order.compare(a, b));
    Ok(ids)
}

fn read_stdin() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
