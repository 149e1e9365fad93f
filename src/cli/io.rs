//! JSON I/O handling for CLI
//!
//! - Input: one JSON value from a file or stdin
//! - Output: one JSON value per line on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a candidate from `path`, or all of stdin when `None`
pub fn read_candidate(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", p.display(), e)))?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a value as a single JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
