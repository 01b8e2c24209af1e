//! Terminal diagram rendering.
//!
//! One renderer serves both layouts and both output formats; decoration is
//! delegated to a [`DiagramFormatter`] and text goes to a caller-supplied
//! [`fmt::Write`] sink. Rendering never fails on graph shape: cycles become
//! markers, deep branches are cut, dangling edges render as ordinary lines.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use strum::IntoEnumIterator;
use tracing::debug;

use crate::classify::{self, Category, Color};
use crate::config::{Layout, MAX_DEPTH_LIMIT, RenderConfig};
use crate::format::DiagramFormatter;
use crate::hierarchy::HierarchyIndex;
use crate::parse::GraphText;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const DEPENDENCY_ARROW: &str = "     └─► ";

/// Node and edge totals shown at the bottom of every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub resources: usize,
    pub modules: usize,
    pub data_sources: usize,
    pub dependencies: usize,
}

impl Summary {
    pub const SEPARATOR: &'static str = "  •  ";

    /// Count nodes by category and every edge as a dependency.
    ///
    /// Nodes are counted once per address, so the `(expand)` / `(close)`
    /// pair older Terraform releases emit for a module counts as one module.
    pub fn from_graph(graph: &GraphText) -> Self {
        let mut summary = Summary {
            dependencies: graph.edges.len(),
            ..Default::default()
        };
        let mut seen = HashSet::new();
        for node in &graph.nodes {
            if !seen.insert(classify::address(node)) {
                continue;
            }
            match classify::classify(node) {
                Category::Resource => summary.resources += 1,
                Category::Module => summary.modules += 1,
                Category::DataSource => summary.data_sources += 1,
                _ => {}
            }
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resources{sep}{} modules{sep}{} data sources{sep}{} dependencies",
            self.resources,
            self.modules,
            self.data_sources,
            self.dependencies,
            sep = Self::SEPARATOR
        )
    }
}

/// Label of one line in a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLabel<'g> {
    Node(&'g str),
    Circular,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'g> {
    pub label: TreeLabel<'g>,
    pub children: Vec<TreeNode<'g>>,
}

impl<'g> TreeNode<'g> {
    fn leaf(label: TreeLabel<'g>) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    /// Number of circular markers anywhere below this node.
    pub fn circular_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| {
                usize::from(child.label == TreeLabel::Circular) + child.circular_count()
            })
            .sum()
    }

    /// Depth of the deepest node, counting this one as 0.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Expand `root` into a tree of its descendants.
///
/// A node that already sits on the path from the root is shown once more with
/// a circular marker beneath it and is not expanded again; the same node may
/// still appear on sibling branches. Nodes deeper than `max_depth` (never
/// more than [`MAX_DEPTH_LIMIT`]) are dropped.
pub fn build_tree<'g>(
    index: &HierarchyIndex<'g>,
    root: &'g str,
    max_depth: usize,
) -> Option<TreeNode<'g>> {
    let mut path = HashSet::new();
    expand(index, root, &mut path, 0, max_depth.min(MAX_DEPTH_LIMIT))
}

fn expand<'g>(
    index: &HierarchyIndex<'g>,
    node: &'g str,
    path: &mut HashSet<&'g str>,
    depth: usize,
    max_depth: usize,
) -> Option<TreeNode<'g>> {
    if depth > max_depth {
        return None;
    }

    if path.contains(node) {
        return Some(TreeNode {
            label: TreeLabel::Node(node),
            children: vec![TreeNode::leaf(TreeLabel::Circular)],
        });
    }

    path.insert(node);
    let children = index
        .children(node)
        .filter_map(|child| expand(index, child, path, depth + 1, max_depth))
        .collect();
    path.remove(node);

    Some(TreeNode {
        label: TreeLabel::Node(node),
        children,
    })
}

/// Renders a parsed graph as a terminal report.
pub struct DiagramRenderer<'c> {
    config: &'c RenderConfig,
    formatter: &'c dyn DiagramFormatter,
}

impl<'c> DiagramRenderer<'c> {
    /// Renderer using the formatter selected by `config.format`.
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            formatter: config.format.formatter(),
        }
    }

    pub fn with_formatter(config: &'c RenderConfig, formatter: &'c dyn DiagramFormatter) -> Self {
        Self { config, formatter }
    }

    pub fn render<W: Write>(&self, graph: &GraphText, out: &mut W) -> fmt::Result {
        match self.config.layout {
            Layout::Tree => self.render_hierarchy(graph, out),
            Layout::Grouped => self.render_grouped(graph, out),
        }
    }

    pub fn render_to_string(&self, graph: &GraphText) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(graph, &mut out);
        out
    }

    fn render_hierarchy<W: Write>(&self, graph: &GraphText, out: &mut W) -> fmt::Result {
        let f = self.formatter;
        let config = self.config;
        let index = HierarchyIndex::build(graph, config.direction, config.fallback_roots);

        self.write_header(out)?;
        writeln!(out)?;
        writeln!(out, "{}", f.section("Infrastructure Hierarchy", Color::Cyan))?;
        writeln!(out)?;

        let roots = index.roots();
        if roots.len() > config.max_roots {
            debug!(
                shown = config.max_roots,
                hidden = roots.len() - config.max_roots,
                "root trees beyond the limit omitted"
            );
        }
        for root in roots.iter().copied().take(config.max_roots) {
            if let Some(tree) = build_tree(&index, root, config.max_depth) {
                self.write_tree(out, &tree)?;
                writeln!(out)?;
            }
        }

        let orphans = &index.orphans()[..index.orphans().len().min(config.max_orphans)];
        if !orphans.is_empty() {
            writeln!(out, "{}", f.section("Standalone Resources", Color::Yellow))?;
            for (i, orphan) in orphans.iter().enumerate() {
                let branch = if i + 1 == orphans.len() { LAST_BRANCH } else { BRANCH };
                writeln!(out, "{branch}{}", self.node_line(orphan))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", f.rule('-'))?;
        writeln!(
            out,
            "{}  {}",
            f.section("Summary", Color::Cyan),
            f.summary(&Summary::from_graph(graph))
        )?;
        writeln!(out, "{}", f.rule('-'))
    }

    fn render_grouped<W: Write>(&self, graph: &GraphText, out: &mut W) -> fmt::Result {
        let f = self.formatter;

        let mut dependencies: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &graph.edges {
            dependencies
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        self.write_header(out)?;
        writeln!(out)?;

        for category in Category::iter() {
            let members: Vec<&str> = graph
                .nodes
                .iter()
                .map(String::as_str)
                .filter(|node| classify::classify(node) == category)
                .collect();
            if members.is_empty() {
                continue;
            }

            let title = format!("{}:", category.section_title());
            writeln!(out, "{}", f.section(&title, Color::Cyan))?;
            for node in members {
                writeln!(out, "  {}", self.node_line(node))?;
                for dep in dependencies.get(node).into_iter().flatten() {
                    let name = classify::display_name(dep);
                    let line = f.node(classify::style(dep), &name, false);
                    writeln!(out, "{DEPENDENCY_ARROW}{line}")?;
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", f.rule('='))?;
        writeln!(
            out,
            "{}  {}",
            f.section("Total", Color::Cyan),
            f.summary(&Summary::from_graph(graph))
        )?;
        writeln!(out, "{}", f.rule('='))
    }

    fn write_header<W: Write>(&self, out: &mut W) -> fmt::Result {
        let f = self.formatter;
        writeln!(out, "{}", f.rule('='))?;
        writeln!(out, "{}", f.title(&self.config.title))?;
        writeln!(out, "{}", f.rule('='))
    }

    fn write_tree<W: Write>(&self, out: &mut W, tree: &TreeNode<'_>) -> fmt::Result {
        writeln!(out, "{}", self.label(tree.label))?;
        self.write_children(out, &tree.children, "")
    }

    fn write_children<W: Write>(
        &self,
        out: &mut W,
        children: &[TreeNode<'_>],
        prefix: &str,
    ) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let (branch, indent) = if last { (LAST_BRANCH, SPACE) } else { (BRANCH, PIPE) };
            writeln!(out, "{prefix}{branch}{}", self.label(child.label))?;
            self.write_children(out, &child.children, &format!("{prefix}{indent}"))?;
        }
        Ok(())
    }

    fn label(&self, label: TreeLabel<'_>) -> String {
        match label {
            TreeLabel::Node(node) => self.node_line(node),
            TreeLabel::Circular => self.formatter.circular_marker(),
        }
    }

    fn node_line(&self, node: &str) -> String {
        self.formatter.node(
            classify::style(node),
            &classify::display_name(node),
            self.config.show_icons,
        )
    }
}
