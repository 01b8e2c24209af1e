//! Permissive scanner for Graphviz DOT text emitted by `terraform graph`.
//!
//! The input is treated as a token stream, not a grammar: node declarations
//! (`"id" [label=...`) and edge statements (`"a" -> "b"`) are picked out with
//! two independent patterns and everything else is ignored. Malformed input
//! yields fewer matches, never an error.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use tfviz_error::{Error, Result};

/// A quoted identifier; `\"` and `\\` escapes are allowed inside.
const QUOTED_ID: &str = r#""((?:[^"\\]|\\.)+)""#;

static NODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{QUOTED_ID}\s*\[label\s*=")).expect("node pattern is valid")
});

static EDGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{QUOTED_ID}\s*->\s*{QUOTED_ID}")).expect("edge pattern is valid")
});

/// A directed edge: `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Nodes and edges recovered from one graph description.
///
/// Nodes are unique and kept in first-seen order. Edges keep every occurrence,
/// duplicates included, and may name identifiers that were never declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphText {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl GraphText {
    pub fn new(nodes: Vec<String>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Scan graph description text for node declarations and edges.
pub fn parse_graph(text: &str) -> GraphText {
    let mut nodes = Vec::new();
    let mut seen = HashSet::new();
    for caps in NODE_RE.captures_iter(text) {
        let node = unescape(caps[1].trim());
        if node.is_empty() || seen.contains(node.as_ref()) {
            continue;
        }
        seen.insert(node.to_string());
        nodes.push(node.into_owned());
    }

    let edges: Vec<Edge> = EDGE_RE
        .captures_iter(text)
        .map(|caps| {
            Edge::new(
                unescape(caps[1].trim()).into_owned(),
                unescape(caps[2].trim()).into_owned(),
            )
        })
        .collect();

    debug!(nodes = nodes.len(), edges = edges.len(), "parsed graph text");
    GraphText { nodes, edges }
}

/// Scan raw bytes, rejecting input that is not UTF-8 text.
///
/// This is the only way the core refuses input: the bytes are not a graph
/// description at all. Any text, however malformed, parses.
pub fn parse_graph_bytes(bytes: &[u8]) -> Result<GraphText> {
    let text = std::str::from_utf8(bytes).map_err(|err| {
        Error::encoding_error("graph description is not valid UTF-8 text")
            .with_operation("parse::parse_graph_bytes")
            .with_context("valid_up_to", err.valid_up_to().to_string())
            .set_source(err)
    })?;
    Ok(parse_graph(text))
}

fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
