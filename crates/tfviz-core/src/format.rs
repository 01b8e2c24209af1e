//! Output decoration for rendered diagrams.
//!
//! The renderer decides *what* goes on each line; a [`DiagramFormatter`]
//! decides how it looks. [`PlainFormatter`] emits bare text, [`StyledFormatter`]
//! adds ANSI colours through `colored` (which honours `NO_COLOR`,
//! `CLICOLOR_FORCE`, and whether stdout is a terminal).

use colored::Colorize;

use crate::classify::{Color, NodeStyle};
use crate::config::OutputFormat;
use crate::render::Summary;

/// Width of horizontal rules.
pub const RULE_WIDTH: usize = 80;

pub const CIRCULAR_MARKER: &str = "(circular reference)";

/// Decoration capability injected into the renderer.
pub trait DiagramFormatter {
    /// A full-width horizontal rule made of `ch`.
    fn rule(&self, ch: char) -> String;

    /// The report title.
    fn title(&self, text: &str) -> String;

    /// A section heading such as "Standalone Resources".
    fn section(&self, text: &str, color: Color) -> String;

    /// One node: optional icon followed by its display name.
    fn node(&self, style: NodeStyle, name: &str, show_icon: bool) -> String;

    /// Leaf placed under a node that already appears on the current path.
    fn circular_marker(&self) -> String;

    /// The one-line totals.
    fn summary(&self, summary: &Summary) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl DiagramFormatter for PlainFormatter {
    fn rule(&self, ch: char) -> String {
        ch.to_string().repeat(RULE_WIDTH)
    }

    fn title(&self, text: &str) -> String {
        text.to_string()
    }

    fn section(&self, text: &str, _color: Color) -> String {
        text.to_string()
    }

    fn node(&self, style: NodeStyle, name: &str, show_icon: bool) -> String {
        if show_icon {
            format!("{} {}", style.icon(), name)
        } else {
            name.to_string()
        }
    }

    fn circular_marker(&self) -> String {
        CIRCULAR_MARKER.to_string()
    }

    fn summary(&self, summary: &Summary) -> String {
        summary.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StyledFormatter;

impl DiagramFormatter for StyledFormatter {
    fn rule(&self, ch: char) -> String {
        ch.to_string().repeat(RULE_WIDTH).cyan().to_string()
    }

    fn title(&self, text: &str) -> String {
        text.bold().cyan().to_string()
    }

    fn section(&self, text: &str, color: Color) -> String {
        text.bold().color(color).to_string()
    }

    fn node(&self, style: NodeStyle, name: &str, show_icon: bool) -> String {
        let name = name.color(style.color());
        if show_icon {
            format!("{} {}", style.icon(), name)
        } else {
            name.to_string()
        }
    }

    fn circular_marker(&self) -> String {
        CIRCULAR_MARKER.dimmed().to_string()
    }

    fn summary(&self, summary: &Summary) -> String {
        [
            format!("{} resources", summary.resources).bold().green(),
            format!("{} modules", summary.modules).bold().cyan(),
            format!("{} data sources", summary.data_sources).bold().blue(),
            format!("{} dependencies", summary.dependencies).bold().white(),
        ]
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(Summary::SEPARATOR)
    }
}

impl From<Color> for colored::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Yellow => colored::Color::Yellow,
            Color::Magenta => colored::Color::Magenta,
            Color::Blue => colored::Color::Blue,
            Color::BrightBlue => colored::Color::BrightBlue,
            Color::Cyan => colored::Color::Cyan,
            Color::BrightCyan => colored::Color::BrightCyan,
            Color::BrightMagenta => colored::Color::BrightMagenta,
            Color::BrightYellow => colored::Color::BrightYellow,
            Color::Green => colored::Color::Green,
        }
    }
}

impl OutputFormat {
    pub fn formatter(&self) -> &'static dyn DiagramFormatter {
        match self {
            OutputFormat::Plain => &PlainFormatter,
            OutputFormat::Styled => &StyledFormatter,
        }
    }
}
