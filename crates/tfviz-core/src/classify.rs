//! Node classification: domain category, display style, and display name.
//!
//! Every identifier maps to exactly one [`Category`] and one [`NodeStyle`].
//! Identifiers that match no rule are plain resources.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Domain category of a graph node, decided by address prefix.
///
/// Variant order is the section order of the grouped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Variable,
    Provider,
    DataSource,
    Module,
    Resource,
    Output,
}

impl Category {
    /// Heading used when nodes are listed by category.
    pub fn section_title(&self) -> &'static str {
        match self {
            Category::Variable => "VARIABLES",
            Category::Provider => "PROVIDERS",
            Category::DataSource => "DATA SOURCES",
            Category::Module => "MODULES",
            Category::Resource => "RESOURCES",
            Category::Output => "OUTPUTS",
        }
    }
}

/// Terminal colour of a styled node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    Yellow,
    Magenta,
    Blue,
    BrightBlue,
    Cyan,
    BrightCyan,
    BrightMagenta,
    BrightYellow,
    Green,
}

/// Display style of a node: an icon and a colour.
///
/// Modules and resources are refined by what the address mentions
/// (storage, databases, messaging, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeStyle {
    Variable,
    Provider,
    DataSource,
    Output,

    DatabaseModule,
    StorageModule,
    MessagingModule,
    FunctionModule,
    MonitoringModule,
    Module,

    ResourceGroup,
    Access,
    Database,
    Storage,
    Messaging,
    FunctionApp,
    Monitoring,
    Resource,
}

impl NodeStyle {
    pub fn icon(&self) -> &'static str {
        match self {
            NodeStyle::Variable => "📥",
            NodeStyle::Provider => "💎",
            NodeStyle::DataSource => "🔍",
            NodeStyle::Output => "📤",
            NodeStyle::DatabaseModule | NodeStyle::Database => "📚",
            NodeStyle::StorageModule | NodeStyle::Storage => "💾",
            NodeStyle::MessagingModule | NodeStyle::Messaging => "📨",
            NodeStyle::FunctionModule | NodeStyle::FunctionApp => "⚡",
            NodeStyle::MonitoringModule | NodeStyle::Monitoring => "📊",
            NodeStyle::Module | NodeStyle::Resource => "📦",
            NodeStyle::ResourceGroup => "🏗️",
            NodeStyle::Access => "🔑",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NodeStyle::Variable => Color::Yellow,
            NodeStyle::Provider => Color::Magenta,
            NodeStyle::DataSource => Color::Blue,
            NodeStyle::Output => Color::BrightBlue,
            NodeStyle::DatabaseModule => Color::BrightCyan,
            NodeStyle::StorageModule
            | NodeStyle::MessagingModule
            | NodeStyle::FunctionModule
            | NodeStyle::MonitoringModule
            | NodeStyle::Module => Color::Cyan,
            NodeStyle::ResourceGroup => Color::BrightMagenta,
            NodeStyle::Access => Color::BrightYellow,
            NodeStyle::Database => Color::BrightCyan,
            NodeStyle::Storage => Color::BrightBlue,
            NodeStyle::Messaging => Color::Blue,
            NodeStyle::FunctionApp => Color::Yellow,
            NodeStyle::Monitoring => Color::Magenta,
            NodeStyle::Resource => Color::Green,
        }
    }
}

/// Module refinements, first match wins.
const MODULE_RULES: &[(&[&str], NodeStyle)] = &[
    (&["cosmos", "database"], NodeStyle::DatabaseModule),
    (&["storage"], NodeStyle::StorageModule),
    (&["service_bus", "servicebus"], NodeStyle::MessagingModule),
    (&["function"], NodeStyle::FunctionModule),
    (
        &["monitoring", "application_insights", "log_analytics"],
        NodeStyle::MonitoringModule,
    ),
];

/// Resource type refinements, first match wins.
const RESOURCE_RULES: &[(&[&str], NodeStyle)] = &[
    (&["resource_group"], NodeStyle::ResourceGroup),
    (&["role_assignment", "role_definition"], NodeStyle::Access),
    (&["cosmosdb", "cosmos_db"], NodeStyle::Database),
    (&["storage_account", "storage_container"], NodeStyle::Storage),
    (&["servicebus", "service_bus"], NodeStyle::Messaging),
    (&["function_app"], NodeStyle::FunctionApp),
    (&["application_insights", "log_analytics"], NodeStyle::Monitoring),
];

/// Strip the decorations older Terraform releases put around addresses:
/// a `[root] ` prefix and an ` (expand)` / ` (close)` suffix.
pub fn address(node: &str) -> &str {
    let node = node.strip_prefix("[root] ").unwrap_or(node);
    node.strip_suffix(" (expand)")
        .or_else(|| node.strip_suffix(" (close)"))
        .unwrap_or(node)
}

pub fn classify(node: &str) -> Category {
    let addr = address(node);
    if addr.starts_with("var.") {
        Category::Variable
    } else if addr.starts_with("provider") {
        Category::Provider
    } else if addr.starts_with("data.") {
        Category::DataSource
    } else if addr.starts_with("output.") {
        Category::Output
    } else if addr.starts_with("module.") {
        Category::Module
    } else {
        Category::Resource
    }
}

pub fn style(node: &str) -> NodeStyle {
    let addr = address(node);
    match classify(addr) {
        Category::Variable => NodeStyle::Variable,
        Category::Provider => NodeStyle::Provider,
        Category::DataSource => NodeStyle::DataSource,
        Category::Output => NodeStyle::Output,
        Category::Module => refine(addr, MODULE_RULES).unwrap_or(NodeStyle::Module),
        Category::Resource => refine(addr, RESOURCE_RULES).unwrap_or(NodeStyle::Resource),
    }
}

fn refine(addr: &str, rules: &[(&[&str], NodeStyle)]) -> Option<NodeStyle> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| addr.contains(needle)))
        .map(|(_, style)| *style)
}

/// Human-facing name: `module.` is dropped and provider registry addresses
/// shrink to the provider's short name (plus alias, if any).
pub fn display_name(node: &str) -> String {
    let addr = address(node);
    if let Some(rest) = addr.strip_prefix("module.") {
        return rest.to_string();
    }
    if let Some(short) = provider_short_name(addr) {
        return short;
    }
    addr.to_string()
}

fn provider_short_name(addr: &str) -> Option<String> {
    if let Some(quoted) = addr.strip_prefix("provider[\"") {
        return Some(match quoted.split_once("\"]") {
            Some((source, alias)) => {
                let short = source.rsplit('/').next().unwrap_or(source);
                format!("{short}{alias}")
            }
            None => quoted.trim_end_matches(['"', ']']).to_string(),
        });
    }
    // 0.12-era addresses: `provider.aws`, `provider.aws.west`
    addr.strip_prefix("provider.").map(str::to_string)
}
