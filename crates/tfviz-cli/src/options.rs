//! Command-line option groups shared by the `tfviz` binary and its tests.
//!
//! Each group is a `clap::Args` struct flattened into the top-level parser, so
//! the same structs can be built directly (with the `with_*` helpers) when the
//! pipeline is driven from code.

use std::path::PathBuf;

use clap::Args;

use tfviz_core::{Layout, OutputFormat, RenderConfig, TreeDirection};
use tfviz_error::{Error, Result};

/// Where the graph comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceOptions {
    /// Directory containing Terraform files
    #[arg(long = "tf-dir", value_name = "DIR", default_value = ".")]
    pub tf_dir: PathBuf,

    /// Terraform executable, or a full command line (e.g. "docker run --rm hashicorp/terraform")
    #[arg(long = "tf-path", value_name = "PATH", default_value = "terraform")]
    pub tf_path: String,

    /// Terraform plan file to visualize, relative to --tf-dir
    #[arg(long = "plan-file", value_name = "FILE")]
    pub plan_file: Option<PathBuf>,

    /// Read an existing DOT graph instead of running terraform ('-' for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "plan_file")]
    pub input: Option<PathBuf>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            tf_dir: PathBuf::from("."),
            tf_path: "terraform".to_string(),
            plan_file: None,
            input: None,
        }
    }
}

impl SourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tf_dir = dir.into();
        self
    }

    pub fn with_tf_path(mut self, path: impl Into<String>) -> Self {
        self.tf_path = path.into();
        self
    }

    pub fn with_plan_file(mut self, plan: impl Into<PathBuf>) -> Self {
        self.plan_file = Some(plan.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// PNG rendering through Graphviz.
#[derive(Args, Debug, Clone)]
pub struct ImageOptions {
    /// Output PNG file path (without it, the diagram is printed to the terminal)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Spacing multiplier between nodes in the image
    #[arg(long = "node-padding", value_name = "FACTOR", default_value_t = 1.0)]
    pub node_padding: f64,

    /// Keep the intermediate tf_graph.dot file
    #[arg(long = "keep-dot")]
    pub keep_dot: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            output: None,
            node_padding: 1.0,
            keep_dot: false,
        }
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_node_padding(mut self, padding: f64) -> Self {
        self.node_padding = padding;
        self
    }

    pub fn with_keep_dot(mut self, keep: bool) -> Self {
        self.keep_dot = keep;
        self
    }
}

/// Terminal diagram settings. Unset flags fall back to `--config`, then defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct DiagramOptions {
    /// TOML file with render settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output style: 'styled' (colours) or 'plain'
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Report layout: 'tree' or 'grouped'
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<Layout>,

    /// Tree direction: 'dependents-first' or 'dependencies-first'
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Option<TreeDirection>,

    /// Hide node icons
    #[arg(long = "no-icons")]
    pub no_icons: bool,

    /// Maximum number of trees shown
    #[arg(long = "max-roots", value_name = "N")]
    pub max_roots: Option<usize>,

    /// Maximum number of standalone resources listed
    #[arg(long = "max-orphans", value_name = "N")]
    pub max_orphans: Option<usize>,

    /// Maximum tree depth
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Also save the diagram as plain text to this file
    #[arg(long = "text-output", value_name = "FILE")]
    pub text_output: Option<PathBuf>,
}

impl DiagramOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn without_icons(mut self) -> Self {
        self.no_icons = true;
        self
    }

    pub fn with_max_roots(mut self, max_roots: usize) -> Self {
        self.max_roots = Some(max_roots);
        self
    }

    pub fn with_text_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.text_output = Some(path.into());
        self
    }

    /// Merge the config file (if any) with the flags given on the command line.
    pub fn resolve(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_path(path).map_err(|err| {
                Error::config_invalid(format!("{err:#}"))
                    .with_operation("options::resolve")
                    .with_context("path", path.display().to_string())
            })?,
            None => RenderConfig::default(),
        };

        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(layout) = self.layout {
            config = config.with_layout(layout);
        }
        if let Some(direction) = self.direction {
            config = config.with_direction(direction);
        }
        if self.no_icons {
            config = config.with_icons(false);
        }
        if let Some(n) = self.max_roots {
            config = config.with_max_roots(n);
        }
        if let Some(n) = self.max_orphans {
            config = config.with_max_orphans(n);
        }
        if let Some(n) = self.max_depth {
            config = config.with_max_depth(n);
        }

        config.validate()?;
        Ok(config)
    }
}
