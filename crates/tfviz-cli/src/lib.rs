//! tfviz command-line interface.
//!
pub mod discovery;
pub mod image;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod welcome;

use tfviz_error::Result;

pub use options::{DiagramOptions, ImageOptions, SourceOptions};
pub use output::Outcome;
pub use pipeline::run_in;

/// Options for running tfviz.
#[derive(Debug, Clone, Default)]
pub struct TfvizOptions {
    pub source: SourceOptions,
    pub image: ImageOptions,
    pub diagram: DiagramOptions,
}

/// Main entry point; relative paths resolve against the current directory.
pub fn run_main(opts: &TfvizOptions) -> Result<Outcome> {
    let launch_dir = std::env::current_dir()?;
    run_in(opts, &launch_dir)
}
