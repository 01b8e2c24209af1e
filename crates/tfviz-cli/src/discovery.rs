//! Locating external executables.

use std::process::{Command, Stdio};

use tracing::{debug, info};

use tfviz_error::{Error, Result};

/// Places `dot` is looked for, in order: PATH first, then the default
/// Windows install locations.
pub const GRAPHVIZ_CANDIDATES: &[&str] = &[
    "dot",
    r"C:\Program Files\Graphviz\bin\dot.exe",
    r"C:\Program Files (x86)\Graphviz\bin\dot.exe",
];

/// Find a working Graphviz `dot`.
pub fn find_graphviz() -> Result<String> {
    find_graphviz_in(GRAPHVIZ_CANDIDATES)
}

pub fn find_graphviz_in(candidates: &[&str]) -> Result<String> {
    match find_executable(candidates, "-V") {
        Some(dot) => {
            info!(dot = %dot, "found graphviz");
            Ok(dot)
        }
        None => Err(Error::tool_not_found("Graphviz dot")
            .with_operation("discovery::find_graphviz")
            .with_context("candidates", candidates.join(", "))),
    }
}

/// First candidate that starts and exits successfully when run with `probe_arg`.
pub fn find_executable(candidates: &[&str], probe_arg: &str) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| probe(candidate, probe_arg))
        .map(|candidate| candidate.to_string())
}

fn probe(program: &str, arg: &str) -> bool {
    let status = Command::new(program)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) => status.success(),
        Err(err) => {
            debug!(program, error = %err, "probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfviz_error::ErrorKind;

    #[test]
    fn missing_candidates_report_tool_not_found() {
        let err = find_graphviz_in(&["tfviz-no-such-dot", "/nonexistent/dot"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
        assert_eq!(err.context_value("tool"), Some("Graphviz dot"));
        assert_eq!(
            err.context_value("candidates"),
            Some("tfviz-no-such-dot, /nonexistent/dot")
        );
    }

    #[cfg(unix)]
    #[test]
    fn first_working_candidate_wins() {
        let found = find_executable(&["tfviz-no-such-tool", "false", "true"], "-V");
        assert_eq!(found.as_deref(), Some("true"));
    }
}
