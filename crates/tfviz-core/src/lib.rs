//! Core of tfviz: turn `terraform graph` output into a terminal diagram.
//!
//! ```text
//! text ──parse──▶ GraphText ──HierarchyIndex──▶ roots / children / orphans ──DiagramRenderer──▶ report
//! ```
//!
//! Every step is a pure function of its input. Nothing is cached between calls
//! and the output sink is always supplied by the caller.
//!
//! ```rust
//! use tfviz_core::{RenderConfig, render_diagram};
//!
//! let dot = r#"
//!     "module.db" [label="db"];
//!     "azurerm_storage_account.s" [label="s"];
//!     "module.db" -> "azurerm_storage_account.s";
//! "#;
//! let report = render_diagram(dot, &RenderConfig::plain());
//! assert!(report.contains("└── azurerm_storage_account.s"));
//! ```

pub mod classify;
pub mod config;
pub mod format;
pub mod hierarchy;
pub mod parse;
pub mod render;

pub use classify::{Category, Color, NodeStyle, classify, display_name, style};
pub use config::{Layout, MAX_DEPTH_LIMIT, OutputFormat, RenderConfig, TreeDirection};
pub use format::{DiagramFormatter, PlainFormatter, StyledFormatter};
pub use hierarchy::HierarchyIndex;
pub use parse::{Edge, GraphText, parse_graph, parse_graph_bytes};
pub use render::{DiagramRenderer, Summary, TreeLabel, TreeNode, build_tree};

/// Parse `text` and render it with `config` in one call.
pub fn render_diagram(text: &str, config: &RenderConfig) -> String {
    let graph = parse_graph(text);
    DiagramRenderer::new(config).render_to_string(&graph)
}
