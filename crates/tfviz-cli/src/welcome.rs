//! Screen shown when `tfviz` is started without arguments.

use std::fmt::{self, Write};

use colored::Colorize;

const OPTIONS: &[(&str, &str)] = &[
    ("-o, --output FILE", "Output PNG file path"),
    ("--tf-dir DIR", "Terraform directory (default: .)"),
    ("--tf-path PATH", "Terraform executable or command line"),
    ("--plan-file FILE", "Visualize a saved plan"),
    ("--input FILE", "Read a DOT graph instead of running terraform"),
    ("--layout tree|grouped", "Report layout"),
    ("--format styled|plain", "Colours on or off"),
    ("--text-output FILE", "Save the diagram as plain text"),
    ("--node-padding N", "Image node spacing (default: 1.0)"),
    ("--keep-dot", "Keep the intermediate DOT file"),
    ("-v, --verbose", "Show progress"),
];

const EXAMPLES: &[&str] = &[
    "tfviz",
    "tfviz --tf-dir ./infra --layout grouped",
    "tfviz --plan-file plan.tfplan -o diagrams/plan.png",
    "terraform graph | tfviz --input -",
];

pub fn render_welcome() -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_welcome(&mut out);
    out
}

fn write_welcome<W: Write>(out: &mut W) -> fmt::Result {
    let width = OPTIONS.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);
    let rule = "═".repeat(60);

    writeln!(out, "{}", rule.cyan())?;
    writeln!(out, "{}", "  tfviz: Terraform Graph Visualizer".bold().cyan())?;
    writeln!(out, "  Version {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{}", rule.cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", "Options".bold())?;
    for (flag, help) in OPTIONS {
        writeln!(out, "  {}  {}", format!("{flag:<width$}").yellow(), help)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "Examples".bold())?;
    for example in EXAMPLES {
        writeln!(out, "  {}", example.green())?;
    }
    writeln!(out)?;
    writeln!(out, "Run {} for the full list of options.", "tfviz --help".bold())
}
