//! CLI command implementations.

pub mod compile;
pub mod formats;
pub mod inspect;
pub mod json_output;
pub mod load;
pub mod verify;

use anyhow::{Context, Result};
use std::fs;

/// Writes `text` to `output`, or to stdout when no path is given.
///
/// A trailing newline is added on stdout only; files hold the text as-is.
pub(crate) fn write_output(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write to: {}", path))
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
