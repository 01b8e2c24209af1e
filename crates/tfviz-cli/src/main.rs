use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tfviz::output::emit;
use tfviz::welcome::render_welcome;
use tfviz::{DiagramOptions, ImageOptions, SourceOptions, TfvizOptions, run_main};
use tfviz_error::{Error, ErrorKind};

#[derive(Parser, Debug)]
#[command(
    name = "tfviz",
    about = "tfviz: Terraform dependency graphs in the terminal or as PNG",
    version
)]
pub struct Cli {
    #[command(flatten)]
    source: SourceOptions,

    #[command(flatten)]
    image: ImageOptions,

    #[command(flatten)]
    diagram: DiagramOptions,

    /// Show progress messages
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("tfviz=info,tfviz_core=info")
    } else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn install_hint(err: &Error) -> Option<&'static str> {
    match (err.kind(), err.context_value("tool")) {
        (ErrorKind::ToolNotFound, Some("Terraform")) => {
            Some("Install Terraform or point --tf-path at it")
        }
        (ErrorKind::ToolNotFound, _) => Some("Install Graphviz with: winget install graphviz"),
        _ => None,
    }
}

fn report_error(err: &Error) {
    eprintln!("{} {}", "[ ERROR ]".red().bold(), err.message());
    if let Some(hint) = install_hint(err) {
        eprintln!("   {}", hint.yellow());
    }
    tracing::error!(error = %err, "execution failed");
}

pub fn run(args: Cli) -> tfviz_error::Result<()> {
    let total_start = Instant::now();
    init_tracing(args.verbose);

    let opts = TfvizOptions {
        source: args.source,
        image: args.image,
        diagram: args.diagram,
    };

    let outcome = run_main(&opts)?;
    emit(&outcome)?;

    tracing::info!(
        total_secs = total_start.elapsed().as_secs_f64(),
        "complete"
    );
    Ok(())
}

pub fn main() -> ExitCode {
    if std::env::args_os().len() == 1 {
        print!("{}", render_welcome());
        return ExitCode::SUCCESS;
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse_into_option_groups() {
        let cli = Cli::try_parse_from([
            "tfviz",
            "--tf-dir",
            "infra",
            "--plan-file",
            "plan.tfplan",
            "-o",
            "out.png",
            "--node-padding",
            "1.5",
            "--layout",
            "grouped",
            "--format",
            "PLAIN",
            "--max-depth",
            "4",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.source.tf_dir, std::path::PathBuf::from("infra"));
        assert_eq!(cli.source.tf_path, "terraform");
        assert_eq!(cli.image.node_padding, 1.5);
        assert_eq!(cli.diagram.layout, Some(tfviz_core::Layout::Grouped));
        assert_eq!(cli.diagram.format, Some(tfviz_core::OutputFormat::Plain));
        assert_eq!(cli.diagram.max_depth, Some(4));
        assert!(cli.verbose);
    }

    #[test]
    fn input_conflicts_with_plan_file() {
        let result = Cli::try_parse_from(["tfviz", "--input", "g.dot", "--plan-file", "p"]);
        assert!(result.is_err());
    }

    #[test]
    fn graphviz_errors_get_install_hint() {
        let err = Error::tool_not_found("Graphviz dot");
        assert_eq!(
            install_hint(&err),
            Some("Install Graphviz with: winget install graphviz")
        );
        assert!(install_hint(&Error::unexpected("boom")).is_none());
    }
}
