use pretty_assertions::assert_eq;
use serial_test::serial;

use tfviz_core::{
    DiagramRenderer, Edge, GraphText, Layout, MAX_DEPTH_LIMIT, RenderConfig, TreeDirection,
    parse_graph, render_diagram,
};

const AZURE_DOT: &str = include_str!("fixtures/azure.dot");
const AZURE_TREE: &str = include_str!("fixtures/azure_tree.txt");

const E2E_DOT: &str = r#"
digraph G {
  "module.db" [label="db"];
  "azurerm_storage_account.s" [label="s"];
  "module.db" -> "azurerm_storage_account.s";
}
"#;

fn rule(ch: char) -> String {
    ch.to_string().repeat(80)
}

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> GraphText {
    GraphText::new(
        nodes.iter().map(|n| n.to_string()).collect(),
        edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect(),
    )
}

fn plain(graph: &GraphText) -> String {
    DiagramRenderer::new(&RenderConfig::plain()).render_to_string(graph)
}

#[test]
fn module_with_storage_dependency() {
    let output = render_diagram(E2E_DOT, &RenderConfig::plain());

    let expected = format!(
        "{eq}\nTERRAFORM INFRASTRUCTURE GRAPH\n{eq}\n\n\
         Infrastructure Hierarchy\n\n\
         db\n\
         └── azurerm_storage_account.s\n\n\
         {dash}\n\
         Summary  1 resources  •  1 modules  •  0 data sources  •  1 dependencies\n\
         {dash}\n",
        eq = rule('='),
        dash = rule('-'),
    );
    assert_eq!(output, expected);
}

#[test]
fn terraform_graph_fixture_renders_three_roots() {
    let output = render_diagram(AZURE_DOT, &RenderConfig::plain());
    assert_eq!(output, AZURE_TREE);
}

#[test]
fn dependencies_first_puts_prerequisites_on_top() {
    let config = RenderConfig::plain().with_direction(TreeDirection::DependenciesFirst);
    let output = render_diagram(E2E_DOT, &config);

    assert!(output.contains("azurerm_storage_account.s\n└── db\n"), "{output}");
}

#[test]
fn rendering_is_deterministic() {
    let graph = parse_graph(AZURE_DOT);
    let renderer_config = RenderConfig::plain();
    let renderer = DiagramRenderer::new(&renderer_config);

    assert_eq!(renderer.render_to_string(&graph), renderer.render_to_string(&graph));
}

#[test]
fn empty_input_renders_zero_summary() {
    let output = render_diagram("", &RenderConfig::plain());

    assert!(output.contains("Infrastructure Hierarchy"));
    assert!(!output.contains("Standalone Resources"));
    assert!(output.contains("0 resources  •  0 modules  •  0 data sources  •  0 dependencies"));
}

#[test]
fn orphan_appears_only_in_standalone_section() {
    let g = graph(
        &["aws_vpc.main", "aws_subnet.a", "aws_eip.lonely"],
        &[("aws_subnet.a", "aws_vpc.main")],
    );
    let output = plain(&g);

    let (hierarchy, standalone) = output.split_once("Standalone Resources").unwrap();
    assert!(!hierarchy.contains("aws_eip.lonely"));
    assert!(standalone.starts_with("\n└── aws_eip.lonely\n"), "{standalone}");
}

#[test]
fn orphans_are_sorted_and_capped() {
    let names: Vec<String> = (0..25).rev().map(|i| format!("aws_eip.e{i:02}")).collect();
    let nodes: Vec<&str> = names.iter().map(String::as_str).collect();
    let output = plain(&graph(&nodes, &[]));

    let listed: Vec<&str> = output
        .lines()
        .filter_map(|line| line.strip_prefix("├── ").or_else(|| line.strip_prefix("└── ")))
        .collect();
    assert_eq!(listed.len(), 20);
    assert_eq!(listed.first(), Some(&"aws_eip.e00"));
    assert_eq!(listed.last(), Some(&"aws_eip.e19"));
}

#[test]
fn cycle_renders_marker_per_branch_and_terminates() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let output = plain(&g);

    // No natural root: the fallback picks all three, each tree closing its own loop.
    assert_eq!(output.matches("(circular reference)").count(), 3);
    assert!(output.contains("a\n└── b\n    └── c\n        └── a\n            └── (circular reference)\n"));
}

#[test]
fn fallback_is_capped_at_five_roots() {
    // A ring of eight: every node is both parent and child.
    let names: Vec<String> = (0..8).map(|i| format!("n{i}")).collect();
    let nodes: Vec<&str> = names.iter().map(String::as_str).collect();
    let edges: Vec<(&str, &str)> = (0..8).map(|i| (nodes[i], nodes[(i + 1) % 8])).collect();
    let output = plain(&graph(&nodes, &edges));

    let top_level: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with('n'))
        .collect();
    assert_eq!(top_level, ["n0", "n1", "n2", "n3", "n4"]);
}

#[test]
fn oversized_depth_cap_is_clamped_on_long_chains() {
    let names: Vec<String> = (0..10_000).map(|i| format!("n{i:05}")).collect();
    let nodes: Vec<&str> = names.iter().map(String::as_str).collect();
    let edges: Vec<(&str, &str)> = nodes.windows(2).map(|w| (w[0], w[1])).collect();
    let config = RenderConfig::plain().with_max_depth(1_000_000);

    let output = DiagramRenderer::new(&config).render_to_string(&graph(&nodes, &edges));

    let last = format!("n{MAX_DEPTH_LIMIT:05}");
    let cut = format!("n{:05}", MAX_DEPTH_LIMIT + 1);
    assert!(output.contains(&format!("└── {last}\n")));
    assert!(!output.contains(&cut));
    assert!(output.contains("9999 dependencies"));
}

#[test]
fn max_roots_limits_trees() {
    let g = graph(
        &["r1", "r2", "r3", "leaf"],
        &[("r1", "leaf"), ("r2", "leaf"), ("r3", "leaf")],
    );
    let config = RenderConfig::plain().with_max_roots(2);
    let output = DiagramRenderer::new(&config).render_to_string(&g);

    assert!(output.contains("r1\n"));
    assert!(output.contains("r2\n"));
    assert!(!output.contains("r3\n"));
}

#[test]
fn dangling_edge_renders_as_a_line() {
    let g = graph(&["module.app"], &[("module.app", "aws_iam_role.undeclared")]);
    let output = plain(&g);

    assert!(output.contains("app\n└── aws_iam_role.undeclared\n"));
    assert!(output.contains("0 resources  •  1 modules  •  0 data sources  •  1 dependencies"));
}

#[test]
fn grouped_layout_lists_categories_with_dependencies() {
    let config = RenderConfig::plain().with_layout(Layout::Grouped);
    let output = render_diagram(AZURE_DOT, &config);

    let expected_resources = "RESOURCES:\n  \
        azurerm_resource_group.main\n     └─► azurerm\n     └─► var.location\n  \
        azurerm_storage_account.data\n     └─► azurerm_resource_group.main\n  \
        azurerm_role_assignment.reader\n     └─► azurerm_storage_account.data\n\n";
    assert!(output.contains(expected_resources), "{output}");
    assert!(output.contains("VARIABLES:\n  var.location\n  var.unused\n\n"));
    assert!(output.contains("PROVIDERS:\n  azurerm\n\n"));
    assert!(output.contains("MODULES:\n  functions\n     └─► azurerm_storage_account.data\n\n"));
    assert!(!output.contains("DATA SOURCES:"));
    assert!(output.contains("Total  3 resources  •  1 modules  •  0 data sources  •  6 dependencies"));

    let sections: Vec<&str> = output.lines().filter(|l| l.ends_with(':')).collect();
    assert_eq!(sections, ["VARIABLES:", "PROVIDERS:", "MODULES:", "RESOURCES:", "OUTPUTS:"]);
}

#[test]
fn icons_prefix_node_names() {
    let config = RenderConfig::plain().with_icons(true);
    let output = render_diagram(E2E_DOT, &config);

    assert!(output.contains("📦 db\n└── 💾 azurerm_storage_account.s\n"), "{output}");
}

#[test]
#[serial]
fn styled_output_contains_escape_codes() {
    colored::control::set_override(true);
    let output = render_diagram(E2E_DOT, &RenderConfig::default());
    colored::control::unset_override();

    assert!(output.contains("\u{1b}["));
    assert!(output.contains("azurerm_storage_account.s"));
}
