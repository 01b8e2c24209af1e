//! Error kinds for tfviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide what to tell the user, e.g. an
/// install hint for [`ErrorKind::ToolNotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration file or render limits
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    /// Input was not valid UTF-8 text
    EncodingError,

    // =========================================================================
    // External tool errors
    // =========================================================================
    /// A required executable (terraform, dot) could not be started
    ToolNotFound,

    /// An external executable ran but exited unsuccessfully
    ToolFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// Working directory does not exist
    DirectoryNotFound,

    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// Writing the rendered diagram failed
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
