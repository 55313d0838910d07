//! ID inspection.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use typesafe_id::TypeId;

use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// IDs to inspect.
    #[arg(required = true)]
    ids: Vec<String>,
}

/// The parts of one parsed ID.
#[derive(Debug, Clone, Serialize, Tabled)]
struct IdParts {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Prefix")]
    prefix: String,

    #[tabled(rename = "Suffix")]
    suffix: String,

    #[tabled(rename = "UUID")]
    uuid: String,

    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&TypeId> for IdParts {
    fn from(id: &TypeId) -> Self {
        Self {
            id: id.to_string(),
            prefix: id.prefix().to_string(),
            suffix: id.suffix(),
            uuid: id.uuid().hyphenated().to_string(),
            timestamp: id
                .timestamp()
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

pub fn run(args: InspectArgs, format: OutputFormat) -> Result<()> {
    let total = args.ids.len();
    let mut parts = Vec::with_capacity(total);
    let mut failed = 0;

    for raw in &args.ids {
        match TypeId::parse(raw) {
            Ok(id) => parts.push(IdParts::from(&id)),
            Err(err) => {
                failed += 1;
                tracing::warn!(id = %raw, error = %err, "cannot parse ID");
                eprintln!("{raw}: {err}");
            }
        }
    }

    print_output(&parts, format);

    if failed > 0 {
        return Err(CliError::Unparseable { failed, total }.into());
    }
    Ok(())
}
