//! Command reports

use serde::Serialize;

use crate::CliError;

/// Outcome of a command: printed as a JSON document with `--json`, as text otherwise
pub trait Report: Serialize {
    /// Plain-text rendering
    fn render(&self) -> String;
}

/// Print a report to stdout
pub fn emit<R: Report>(report: &R, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}
