//! Run pipeline: resolve config → fetch graph → render diagram or image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use tfviz_core::{DiagramRenderer, GraphText, OutputFormat, RenderConfig, parse_graph_bytes};
use tfviz_error::{Error, Result};

use crate::TfvizOptions;
use crate::discovery::find_graphviz;
use crate::image::{DOT_FILE_NAME, ImageRenderer};
use crate::output::{Outcome, write_text};
use crate::source::{DotFile, GraphSource, TerraformGraph};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// The Terraform working directory, which must exist.
pub fn working_dir(launch_dir: &Path, tf_dir: &Path) -> Result<PathBuf> {
    let dir = resolve_path(launch_dir, tf_dir);
    if !dir.is_dir() {
        return Err(Error::directory_not_found(tf_dir.display().to_string())
            .with_operation("pipeline::working_dir"));
    }
    Ok(dir)
}

/// Pick the graph source. An explicit `--input` wins over running terraform.
pub fn graph_source(opts: &TfvizOptions, launch_dir: &Path, work_dir: &Path) -> Result<Box<dyn GraphSource>> {
    match &opts.source.input {
        Some(input) if input.as_os_str() == "-" => Ok(Box::new(DotFile::new(input))),
        Some(input) => Ok(Box::new(DotFile::new(resolve_path(launch_dir, input)))),
        None => Ok(Box::new(TerraformGraph::new(
            &opts.source.tf_path,
            work_dir,
            opts.source.plan_file.clone(),
        )?)),
    }
}

/// Run one tfviz invocation relative to `launch_dir`.
///
/// Relative `--output`, `--input`, `--text-output` and `--tf-dir` paths are
/// resolved against `launch_dir`; terraform itself runs inside the tf dir.
pub fn run_in(opts: &TfvizOptions, launch_dir: &Path) -> Result<Outcome> {
    let config = opts.diagram.resolve()?;
    let work_dir = working_dir(launch_dir, &opts.source.tf_dir)?;

    // Fail before running terraform when the image can't be produced anyway.
    let dot = match opts.image.output {
        Some(_) => Some(find_graphviz()?),
        None => None,
    };

    let source = graph_source(opts, launch_dir, &work_dir)?;
    let fetch_start = Instant::now();
    let raw = source.read_graph()?;
    info!(
        source = %source.describe(),
        bytes = raw.len(),
        "graph fetched in {:.2}s",
        fetch_start.elapsed().as_secs_f64()
    );

    if let (Some(output), Some(dot)) = (&opts.image.output, dot) {
        let output = resolve_path(launch_dir, output);
        let renderer = ImageRenderer::new(dot, opts.image.node_padding);
        renderer.render(&raw, &work_dir.join(DOT_FILE_NAME), &output, opts.image.keep_dot)?;

        let size_bytes = fs::metadata(&output)?.len();
        return Ok(Outcome::Image {
            path: output,
            size_bytes,
        });
    }

    let graph = parse_graph_bytes(&raw)?;
    let diagram = render(&graph, &config)?;

    if let Some(path) = &opts.diagram.text_output {
        let plain = config.clone().with_format(OutputFormat::Plain);
        write_text(&resolve_path(launch_dir, path), &render(&graph, &plain)?)?;
    }

    Ok(Outcome::Diagram(diagram))
}

fn render(graph: &GraphText, config: &RenderConfig) -> Result<String> {
    let mut out = String::new();
    DiagramRenderer::new(config)
        .render(graph, &mut out)
        .map_err(|err| Error::from(err).with_operation("pipeline::render"))?;
    Ok(out)
}
