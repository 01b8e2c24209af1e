//! # tfviz-error
//!
//! Unified error handling for tfviz.
//!
//! - **ErrorKind**: what went wrong (a missing tool, a failed tool run, bad configuration)
//! - **Context**: key/value pairs that locate the cause (paths, commands, exit codes)
//! - **Source**: the underlying error, wrapped rather than leaked
//!
//! ```rust
//! use tfviz_error::{Error, ErrorKind};
//!
//! fn locate() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ToolNotFound, "Graphviz dot executable not found")
//!         .with_operation("discovery::find_graphviz")
//!         .with_context("candidates", "dot"))
//! }
//! ```
//!
//! Graph shape is never an error in tfviz: the renderer degrades instead of failing.
//! Errors only come from the process boundary (tools, files, configuration) and from
//! callers handing the core something that is not text.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the tfviz Error
pub type Result<T> = std::result::Result<T, Error>;
