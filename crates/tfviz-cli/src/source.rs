//! Where graph text comes from: a `terraform graph` run, or a DOT file.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use tfviz_error::{Error, ErrorKind, Result};

/// Anything that can produce raw `terraform graph` output.
pub trait GraphSource {
    /// Raw DOT bytes. Decoding is left to the caller so the bytes can also be
    /// handed to Graphviz untouched.
    fn read_graph(&self) -> Result<Vec<u8>>;

    /// Short human description, for logs.
    fn describe(&self) -> String;
}

/// Runs `<tf-path> graph [-plan <file>]` inside a working directory.
#[derive(Debug, Clone)]
pub struct TerraformGraph {
    program: String,
    prefix_args: Vec<String>,
    work_dir: PathBuf,
    plan_file: Option<PathBuf>,
}

impl TerraformGraph {
    /// `tf_path` may be a bare executable or a quoted command line; it is
    /// split with shell rules.
    pub fn new(tf_path: &str, work_dir: impl Into<PathBuf>, plan_file: Option<PathBuf>) -> Result<Self> {
        let mut words = shell_words::split(tf_path).map_err(|err| {
            Error::invalid_argument(format!("cannot parse terraform path '{tf_path}': {err}"))
                .with_operation("source::TerraformGraph::new")
        })?;
        if words.is_empty() {
            return Err(Error::invalid_argument("terraform path is empty")
                .with_operation("source::TerraformGraph::new"));
        }
        let program = words.remove(0);

        Ok(Self {
            program,
            prefix_args: words,
            work_dir: work_dir.into(),
            plan_file,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Every argument passed to the program, including any that came from `tf_path`.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.prefix_args.clone();
        args.push("graph".to_string());
        if let Some(plan) = &self.plan_file {
            args.push("-plan".to_string());
            args.push(plan.display().to_string());
        }
        args
    }
}

impl GraphSource for TerraformGraph {
    fn read_graph(&self) -> Result<Vec<u8>> {
        let args = self.args();
        info!(program = %self.program, ?args, dir = %self.work_dir.display(), "running terraform");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|err| {
                let error = if err.kind() == io::ErrorKind::NotFound {
                    Error::tool_not_found("Terraform")
                } else {
                    Error::new(ErrorKind::IoFailed, format!("failed to start terraform: {err}"))
                };
                error
                    .with_operation("source::TerraformGraph::read_graph")
                    .with_context("command", self.program.clone())
                    .set_source(err)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed(
                "terraform",
                format!("Failed to generate TF graph: {}", stderr.trim()),
            )
            .with_operation("source::TerraformGraph::read_graph")
            .with_context("status", output.status.to_string()));
        }

        debug!(bytes = output.stdout.len(), "terraform graph finished");
        Ok(output.stdout)
    }

    fn describe(&self) -> String {
        format!("{} {}", self.program, self.args().join(" "))
    }
}

/// A DOT file on disk, or stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct DotFile {
    path: PathBuf,
}

impl DotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn is_stdin(&self) -> bool {
        self.path == Path::new("-")
    }
}

impl GraphSource for DotFile {
    fn read_graph(&self) -> Result<Vec<u8>> {
        if self.is_stdin() {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            return Ok(buf);
        }

        fs::read(&self.path).map_err(|err| {
            let error = if err.kind() == io::ErrorKind::NotFound {
                Error::file_not_found(self.path.display().to_string())
            } else {
                Error::from(err)
            };
            error.with_operation("source::DotFile::read_graph")
        })
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_program_runs_graph() {
        let tf = TerraformGraph::new("terraform", ".", None).unwrap();
        assert_eq!(tf.program(), "terraform");
        assert_eq!(tf.args(), ["graph"]);
    }

    #[test]
    fn command_line_is_split_with_shell_rules() {
        let tf = TerraformGraph::new(
            r#"docker run --rm -v "/my dir:/w" hashicorp/terraform"#,
            ".",
            Some(PathBuf::from("plan.tfplan")),
        )
        .unwrap();

        assert_eq!(tf.program(), "docker");
        assert_eq!(
            tf.args(),
            ["run", "--rm", "-v", "/my dir:/w", "hashicorp/terraform", "graph", "-plan", "plan.tfplan"]
        );
    }

    #[test]
    fn empty_or_unbalanced_path_is_invalid() {
        for bad in ["", "   ", "\"unterminated"] {
            let err = TerraformGraph::new(bad, ".", None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{bad:?}");
        }
    }

    #[test]
    fn missing_terraform_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let tf = TerraformGraph::new("tfviz-no-such-terraform", dir.path(), None).unwrap();

        let err = tf.read_graph().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
        assert_eq!(err.context_value("tool"), Some("Terraform"));
    }

    #[test]
    fn missing_dot_file_is_file_not_found() {
        let err = DotFile::new("/nonexistent/graph.dot").read_graph().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn dash_means_stdin() {
        assert!(DotFile::new("-").is_stdin());
        assert_eq!(DotFile::new("-").describe(), "stdin");
        assert!(!DotFile::new("g.dot").is_stdin());
    }
}
