//! The main Error type for tfviz.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::ErrorKind;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Unified error type for all tfviz operations.
///
/// Errors are built with a kind and a user-facing message, then located with
/// [`Error::with_operation`] and [`Error::with_context`] as they travel up.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message meant for the user, without kind or location.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// First value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }

    /// Record where the error surfaced. An earlier operation is kept in the
    /// context under `called`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            let previous = std::mem::replace(&mut self.operation, operation);
            self.context.push(("called", previous.to_string()));
        } else {
            self.operation = operation;
        }
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the underlying cause. Only one cause is kept.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        for (i, (key, value)) in self.context.iter().enumerate() {
            let sep = if i == 0 { " [" } else { ", " };
            write!(f, "{sep}{key}: {value}")?;
        }
        if !self.context.is_empty() {
            f.write_str("]")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        s.field("kind", &self.kind).field("message", &self.message);
        if !self.operation.is_empty() {
            s.field("operation", &self.operation);
        }
        if !self.context.is_empty() {
            s.field("context", &self.context);
        }
        if let Some(source) = &self.source {
            s.field("source", source);
        }
        s.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string()).set_source(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Error::new(ErrorKind::RenderFailed, "failed to write rendered diagram").set_source(err)
    }
}

// Constructors for the failures tfviz reports.
impl Error {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodingError, message)
    }

    /// `tool` could not be started; the name is kept under the `tool` key.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        Self::new(ErrorKind::ToolNotFound, format!("{tool} executable not found"))
            .with_context("tool", tool)
    }

    /// `tool` ran and failed; `message` usually carries its stderr.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ToolFailed, message).with_context("tool", tool)
    }

    pub fn directory_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::DirectoryNotFound,
            format!("Directory '{path}' does not exist"),
        )
        .with_context("path", path)
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{path}' not found"))
            .with_context("path", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_error_has_no_location() {
        let err = Error::new(ErrorKind::ConfigInvalid, "max_roots must be > 0");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.message(), "max_roots must be > 0");
        assert_eq!(err.operation(), "");
        assert!(err.context().is_empty());
    }

    #[test]
    fn later_operation_keeps_earlier_one_as_called() {
        let err = Error::tool_failed("terraform", "exit status 1")
            .with_operation("source::read_graph")
            .with_operation("pipeline::run");

        assert_eq!(err.operation(), "pipeline::run");
        assert_eq!(err.context_value("tool"), Some("terraform"));
        assert_eq!(err.context_value("called"), Some("source::read_graph"));
    }

    #[test]
    fn display_shows_kind_location_and_message() {
        let err = Error::directory_not_found("../dev").with_operation("pipeline::working_dir");

        assert_eq!(
            err.to_string(),
            "DirectoryNotFound at pipeline::working_dir [path: ../dev]: Directory '../dev' does not exist"
        );
    }

    #[test]
    fn display_without_operation_or_context() {
        assert_eq!(Error::unexpected("boom").to_string(), "Unexpected: boom");
    }

    #[test]
    fn tool_not_found_names_the_tool() {
        let err = Error::tool_not_found("Graphviz dot");
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
        assert_eq!(err.message(), "Graphviz dot executable not found");
        assert_eq!(err.context_value("tool"), Some("Graphviz dot"));
    }

    #[test]
    fn io_errors_map_to_kinds() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(StdError::source(&err).is_some());

        let err = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let err = Error::from(io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::IoFailed);
    }

    #[test]
    fn fmt_error_is_render_failure() {
        assert_eq!(Error::from(fmt::Error).kind(), ErrorKind::RenderFailed);
    }

    #[test]
    fn debug_includes_source() {
        let err = Error::from(io::Error::other("disk full")).with_operation("output::write_text");
        let debug = format!("{err:?}");
        assert!(debug.contains("IoFailed"));
        assert!(debug.contains("output::write_text"));
        assert!(debug.contains("disk full"));
    }
}
