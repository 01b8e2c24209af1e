//! Render configuration.
//!
//! All display limits are plain values rather than constants so a caller (or a
//! `tfviz.toml` file) can widen or narrow them. Defaults match what the tool
//! has always shown.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// How node names are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OutputFormat {
    /// No escape codes; safe to write to files
    Plain,
    /// ANSI colours for terminals
    #[default]
    Styled,
}

/// Overall shape of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Layout {
    /// Hierarchy trees, standalone nodes, summary
    #[default]
    Tree,
    /// Nodes listed by category with their direct dependencies
    Grouped,
}

/// Which end of an edge becomes the parent in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TreeDirection {
    /// For `a -> b`, `b` is nested under `a`: dependents at the top,
    /// prerequisites beneath them.
    #[default]
    DependentsFirst,
    /// For `a -> b`, `a` is nested under `b`: prerequisites at the top,
    /// everything that depends on them beneath.
    DependenciesFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub layout: Layout,
    pub direction: TreeDirection,

    /// Prefix node names with their category icon
    pub show_icons: bool,

    /// Header text
    pub title: String,

    /// Maximum number of root trees rendered
    pub max_roots: usize,

    /// Maximum number of standalone nodes listed
    pub max_orphans: usize,

    /// Branches deeper than this are cut (the root is depth 0)
    pub max_depth: usize,

    /// Roots picked by child count when the graph has no natural root
    pub fallback_roots: usize,
}

/// Deepest tree the renderer will descend into. Rendering recurses once per
/// level, so this bounds stack use regardless of graph shape.
pub const MAX_DEPTH_LIMIT: usize = 256;

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            format: OutputFormat::Styled,
            layout: Layout::Tree,
            direction: TreeDirection::DependentsFirst,
            show_icons: true,
            title: "TERRAFORM INFRASTRUCTURE GRAPH".to_string(),
            max_roots: 10,
            max_orphans: 20,
            max_depth: 10,
            fallback_roots: 5,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text, no icons: output that survives any pipe or file.
    pub fn plain() -> Self {
        RenderConfig {
            format: OutputFormat::Plain,
            show_icons: false,
            ..Default::default()
        }
    }

    /// Load overrides from a TOML file. Keys that are absent keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read render config {}", path.display()))?;
        let config: RenderConfig =
            toml::from_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))?;
        Ok(config)
    }

    // Builder methods
    // ====================================================================

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_direction(mut self, direction: TreeDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_icons(mut self, enabled: bool) -> Self {
        self.show_icons = enabled;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_max_roots(mut self, max_roots: usize) -> Self {
        self.max_roots = max_roots;
        self
    }

    pub fn with_max_orphans(mut self, max_orphans: usize) -> Self {
        self.max_orphans = max_orphans;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_fallback_roots(mut self, fallback_roots: usize) -> Self {
        self.fallback_roots = fallback_roots;
        self
    }

    /// Reject limits that would hide every tree or descend too deep.
    pub fn validate(&self) -> tfviz_error::Result<()> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(tfviz_error::Error::config_invalid(format!(
                "max_depth must be <= {MAX_DEPTH_LIMIT}"
            ))
            .with_operation("config::validate")
            .with_context("max_depth", self.max_depth.to_string()));
        }
        if self.max_roots == 0 {
            return Err(tfviz_error::Error::config_invalid("max_roots must be > 0")
                .with_operation("config::validate"));
        }
        if self.fallback_roots == 0 {
            return Err(
                tfviz_error::Error::config_invalid("fallback_roots must be > 0")
                    .with_operation("config::validate"),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_display_limits() {
        let config = RenderConfig::default();
        assert_eq!(config.max_roots, 10);
        assert_eq!(config.max_orphans, 20);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.fallback_roots, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: RenderConfig = toml::from_str(
            r#"
            format = "plain"
            direction = "dependencies-first"
            max_depth = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Plain);
        assert_eq!(config.direction, TreeDirection::DependenciesFirst);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_roots, 10);
        assert!(config.show_icons);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<RenderConfig, _> = toml::from_str("max_rootz = 3");
        assert!(result.is_err());
    }

    #[test]
    fn zero_limits_fail_validation() {
        let err = RenderConfig::new().with_max_roots(0).validate().unwrap_err();
        assert_eq!(err.kind(), tfviz_error::ErrorKind::ConfigInvalid);
        assert!(RenderConfig::new().with_fallback_roots(0).validate().is_err());
        assert!(RenderConfig::new().with_max_orphans(0).validate().is_ok());
    }

    #[test]
    fn depth_above_limit_fails_validation() {
        assert!(RenderConfig::new().with_max_depth(MAX_DEPTH_LIMIT).validate().is_ok());
        let err = RenderConfig::new()
            .with_max_depth(1_000_000)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), tfviz_error::ErrorKind::ConfigInvalid);
        assert_eq!(err.context_value("max_depth"), Some("1000000"));
    }

    #[test]
    fn enums_parse_from_cli_strings() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("Grouped".parse::<Layout>().unwrap(), Layout::Grouped);
        assert_eq!(
            "dependents-first".parse::<TreeDirection>().unwrap(),
            TreeDirection::DependentsFirst
        );
        assert_eq!(TreeDirection::DependenciesFirst.to_string(), "dependencies-first");
        assert!("fancy".parse::<OutputFormat>().is_err());
    }
}
