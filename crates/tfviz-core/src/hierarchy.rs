//! Parent/child index reconstructed from a flat edge list.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::config::TreeDirection;
use crate::parse::GraphText;

/// Hierarchy derived from one [`GraphText`].
///
/// Built fresh for every render and borrowed from the graph; never mutated
/// after [`HierarchyIndex::build`] returns.
#[derive(Debug, Clone)]
pub struct HierarchyIndex<'g> {
    /// parent -> children, children kept sorted for stable rendering
    children_of: HashMap<&'g str, BTreeSet<&'g str>>,
    /// parents in the order their first edge appeared
    parents: Vec<&'g str>,
    all_children: HashSet<&'g str>,
    roots: Vec<&'g str>,
    orphans: Vec<&'g str>,
    fallback: bool,
}

impl<'g> HierarchyIndex<'g> {
    /// Index `graph`, choosing parents per `direction`.
    ///
    /// Roots are declared nodes that have children and are nobody's child, in
    /// node order. When no such node exists (every parent is also a child),
    /// up to `fallback_roots` parents with the most children are used
    /// instead. Ties keep node order; parents that were never declared come
    /// last, in edge order.
    pub fn build(graph: &'g GraphText, direction: TreeDirection, fallback_roots: usize) -> Self {
        let mut children_of: HashMap<&'g str, BTreeSet<&'g str>> = HashMap::new();
        let mut parents = Vec::new();
        let mut all_children = HashSet::new();

        for edge in &graph.edges {
            let (parent, child) = match direction {
                TreeDirection::DependentsFirst => (edge.source.as_str(), edge.target.as_str()),
                TreeDirection::DependenciesFirst => (edge.target.as_str(), edge.source.as_str()),
            };
            children_of
                .entry(parent)
                .or_insert_with(|| {
                    parents.push(parent);
                    BTreeSet::new()
                })
                .insert(child);
            all_children.insert(child);
        }

        let mut roots: Vec<&'g str> = graph
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|node| children_of.contains_key(node) && !all_children.contains(node))
            .collect();

        let fallback = roots.is_empty() && !parents.is_empty();
        if fallback {
            let position: HashMap<&str, usize> = graph
                .nodes
                .iter()
                .enumerate()
                .map(|(i, node)| (node.as_str(), i))
                .collect();
            let mut ranked = parents.clone();
            ranked.sort_by_key(|parent| {
                (
                    Reverse(children_of[parent].len()),
                    position.get(parent).copied().unwrap_or(usize::MAX),
                )
            });
            ranked.truncate(fallback_roots);
            roots = ranked;
        }

        let mut orphans: Vec<&'g str> = graph
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|node| !children_of.contains_key(node) && !all_children.contains(node))
            .collect();
        orphans.sort_unstable();

        debug!(
            parents = parents.len(),
            roots = roots.len(),
            orphans = orphans.len(),
            fallback,
            "built hierarchy"
        );

        Self {
            children_of,
            parents,
            all_children,
            roots,
            orphans,
            fallback,
        }
    }

    /// Children of `node` in lexicographic order; empty for leaves and
    /// unknown identifiers.
    pub fn children(&self, node: &str) -> impl Iterator<Item = &'g str> + '_ {
        self.children_of
            .get(node)
            .into_iter()
            .flat_map(|children| children.iter().copied())
    }

    pub fn child_count(&self, node: &str) -> usize {
        self.children_of.get(node).map_or(0, BTreeSet::len)
    }

    pub fn is_parent(&self, node: &str) -> bool {
        self.children_of.contains_key(node)
    }

    pub fn is_child(&self, node: &str) -> bool {
        self.all_children.contains(node)
    }

    /// Every node that has children, in first-edge order.
    pub fn parents(&self) -> &[&'g str] {
        &self.parents
    }

    pub fn roots(&self) -> &[&'g str] {
        &self.roots
    }

    /// Declared nodes that appear in no edge, sorted.
    pub fn orphans(&self) -> &[&'g str] {
        &self.orphans
    }

    /// True when roots were picked by child count because no natural root exists.
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }
}
