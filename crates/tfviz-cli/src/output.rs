//! Output delivery: terminal, text files, and image reports.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;

use tfviz_error::{Error, Result};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A rendered diagram for the terminal.
    Diagram(String),
    /// A PNG written by Graphviz.
    Image { path: PathBuf, size_bytes: u64 },
}

pub fn size_in_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Save `text` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text).map_err(|err| {
        Error::from(err)
            .with_operation("output::write_text")
            .with_context("path", path.display().to_string())
    })?;
    info!(path = %path.display(), "text output written");
    Ok(())
}

/// Print an outcome to stdout.
pub fn emit(outcome: &Outcome) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match outcome {
        Outcome::Diagram(text) => {
            // A closed pipe (e.g. `| head`) is not a failure.
            match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other.map_err(Error::from),
            }
        }
        Outcome::Image { path, size_bytes } => {
            writeln!(stdout, "{}", image_report(path, *size_bytes))?;
            Ok(())
        }
    }
}

fn image_report(path: &Path, size_bytes: u64) -> String {
    format!(
        "{} {}\n   File size: {:.2} MB",
        "Successfully generated:".green().bold(),
        path.display(),
        size_in_mb(size_bytes)
    )
}
