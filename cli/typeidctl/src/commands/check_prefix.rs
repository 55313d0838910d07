//! Prefix validation.

use anyhow::Result;
use clap::Args;
use typesafe_id::prefix;

use crate::error::CliError;
use crate::output::print_success;

#[derive(Debug, Args)]
pub struct CheckPrefixArgs {
    /// Prefix to check.
    prefix: String,
}

pub fn run(args: CheckPrefixArgs) -> Result<()> {
    match prefix::validate(&args.prefix) {
        Ok(()) => {
            print_success(&format!("'{}' is a valid prefix", args.prefix));
            Ok(())
        }
        Err(reason) => Err(CliError::InvalidPrefix {
            prefix: args.prefix,
            reason,
        }
        .into()),
    }
}
