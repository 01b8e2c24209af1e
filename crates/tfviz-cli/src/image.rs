//! PNG rendering through Graphviz `dot`.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use tfviz_error::{Error, ErrorKind, Result};

/// Name of the intermediate DOT file written into the Terraform directory.
pub const DOT_FILE_NAME: &str = "tf_graph.dot";

const NODE_SEP: f64 = 0.8;
const RANK_SEP: f64 = 1.2;
const DPI: u32 = 150;

#[derive(Debug, Clone)]
pub struct ImageRenderer {
    dot: String,
    node_padding: f64,
}

impl ImageRenderer {
    pub fn new(dot: impl Into<String>, node_padding: f64) -> Self {
        Self {
            dot: dot.into(),
            node_padding,
        }
    }

    /// Arguments for `dot`; spacing scales with the node padding.
    pub fn command_args(&self, dot_file: &Path, output: &Path) -> Vec<String> {
        vec![
            "-Tpng".to_string(),
            format!("-Gnodesep={}", self.node_padding * NODE_SEP),
            format!("-Granksep={}", self.node_padding * RANK_SEP),
            "-Gmargin=0".to_string(),
            format!("-Gdpi={DPI}"),
            dot_file.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }

    /// Write `graph` to `dot_file`, render it to `output`, then remove
    /// `dot_file` unless `keep_dot` is set.
    pub fn render(&self, graph: &[u8], dot_file: &Path, output: &Path, keep_dot: bool) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                Error::from(err)
                    .with_operation("image::render")
                    .with_context("path", parent.display().to_string())
            })?;
        }

        fs::write(dot_file, graph).map_err(|err| {
            Error::from(err)
                .with_operation("image::render")
                .with_context("path", dot_file.display().to_string())
        })?;

        let result = self.run_dot(dot_file, output);

        if keep_dot {
            info!(path = %dot_file.display(), "kept dot file");
        } else if let Err(err) = fs::remove_file(dot_file) {
            warn!(path = %dot_file.display(), error = %err, "failed to remove dot file");
        }

        result
    }

    fn run_dot(&self, dot_file: &Path, output: &Path) -> Result<()> {
        let args = self.command_args(dot_file, output);
        info!(dot = %self.dot, ?args, "rendering png");

        let out = Command::new(&self.dot).args(&args).output().map_err(|err| {
            let error = if err.kind() == io::ErrorKind::NotFound {
                Error::tool_not_found("Graphviz dot")
            } else {
                Error::new(ErrorKind::IoFailed, format!("failed to start dot: {err}"))
            };
            error
                .with_operation("image::run_dot")
                .with_context("command", self.dot.clone())
                .set_source(err)
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(Error::tool_failed(
                "dot",
                format!("Failed to render PNG: {}", stderr.trim()),
            )
            .with_operation("image::run_dot")
            .with_context("status", out.status.to_string()));
        }
        Ok(())
    }
}
