//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;
use typesafe_id::{IdError, PrefixError};

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: PrefixError },

    #[error("{failed} of {total} IDs could not be parsed")]
    Unparseable { failed: usize, total: usize },

    #[error("No IDs given on the command line or stdin")]
    NoInput,
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(id_err) = err.downcast_ref::<IdError>() {
        if id_err.is_malformed() {
            eprintln!(
                "\n{}",
                "Hint: IDs look like 'user_01h455vb4pex5vsknk084sn02q' (lowercase prefix, '_', 26 base32 characters)."
                    .yellow()
            );
        }
        return;
    }

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidPrefix { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: prefixes use a-z and '_', at most 63 characters, not starting or ending with '_'."
                        .yellow()
                );
            }
            CliError::NoInput => {
                eprintln!("\n{}", "Hint: pass IDs as arguments or pipe them in, one per line.".yellow());
            }
            CliError::Unparseable { .. } => {}
        }
    }
}
