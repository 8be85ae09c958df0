//! Error reporting for the binocle application.
//!
//! A failed command prints a short message and then offers to show the full
//! response the service sent back.

use crate::{error::CliError, prompt::Prompter};
use color_print::cformat;
use std::io::Write;
use tracing::debug;

/// Full details of an error: the raw response body when there is one,
/// otherwise the debug representation.
pub fn full_error_details(error: &CliError) -> String {
    match error.api_error().and_then(|e| e.body()) {
        Some(body) if !body.trim().is_empty() => match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
            Err(_) => body.to_string(),
        },
        _ => format!("{:?}", error),
    }
}

/// Prints the short message of a failed command, then offers to print the
/// full response when the failure came back from the service.
pub fn report_error<P: Prompter>(prompter: &mut P, error: &CliError) {
    if let Err(e) = write_report(prompter, error, &mut std::io::stderr()) {
        debug!("Could not report the error: {}", e);
    }
}

/// Writes the report of a failed command to `out`.
pub fn write_report<P: Prompter, W: Write>(
    prompter: &mut P,
    error: &CliError,
    out: &mut W,
) -> std::io::Result<()> {
    debug!("Command failed: {:?}", error);
    writeln!(out, "{}", cformat!("<red>ERROR:</red> {}", error))?;
    if error.api_error().is_none() {
        return Ok(());
    }

    match prompter.confirm("Display full error response?", false) {
        Ok(true) => writeln!(out, "{}", full_error_details(error)),
        Ok(false) => Ok(()),
        Err(e) => {
            debug!("Skipping full error display: {}", e);
            Ok(())
        }
    }
}
