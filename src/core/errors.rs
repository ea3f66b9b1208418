//! Error types for the helloworld-rs library.
//!
//! Every fallible operation in the crate returns [`Result`]. Listing failures
//! raised during recursive enumeration carry the directory that failed so the
//! caller can present it; they are never retried or swallowed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main result type for helloworld operations.
pub type Result<T> = std::result::Result<T, HelloworldError>;

/// Error type for all helloworld operations.
#[derive(Error, Debug)]
pub enum HelloworldError {
    /// The directory-listing capability failed for a directory visited
    /// during enumeration (root or any descendant).
    #[error("Failed to list directory {}: {source}", path.display())]
    Listing {
        /// Directory whose listing failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O related errors outside of directory listing
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Validation errors for configuration values and command input
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        /// Error description
        message: String,
        /// Requested URL
        url: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Panel template errors
    #[error("Template error: {message}")]
    Template {
        /// Error description
        message: String,
    },

    /// A command id that is not registered
    #[error("Unknown command: {id}")]
    UnknownCommand {
        /// The requested command id
        id: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl HelloworldError {
    /// Create a listing failure for `path`
    pub fn listing(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an unknown-command error
    pub fn unknown_command(id: impl Into<String>) -> Self {
        Self::UnknownCommand { id: id.into() }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Whether this error came from the directory-listing capability
    pub fn is_listing_failure(&self) -> bool {
        matches!(self, Self::Listing { .. })
    }

    /// Add context to an existing error.
    ///
    /// Message-carrying variants get the context prefixed to their message and
    /// `Internal` stores it separately. `Listing` and `UnknownCommand` are
    /// returned unchanged: their display is built from the failing path or id,
    /// which callers match on.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Internal { context: ctx, .. } => {
                *ctx = Some(context.into());
            }
            Self::Io { message, .. }
            | Self::Validation { message, .. }
            | Self::Http { message, .. }
            | Self::Serialization { message, .. }
            | Self::Template { message } => {
                *message = format!("{}: {message}", context.into());
            }
            Self::Listing { .. } | Self::UnknownCommand { .. } => {}
        }
        self
    }
}

impl From<io::Error> for HelloworldError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for HelloworldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for HelloworldError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for HelloworldError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            message: err.to_string(),
            url: err.url().map(ToString::to_string),
        }
    }
}

impl From<handlebars::RenderError> for HelloworldError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::template(format!("render failed: {err}"))
    }
}

impl From<handlebars::TemplateError> for HelloworldError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::template(format!("invalid template: {err}"))
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<HelloworldError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<HelloworldError>::into(e).with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| Into::<HelloworldError>::into(e).with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_error_display_names_directory() {
        let err = HelloworldError::listing(
            "/tmp/locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_listing_failure());
        let display = err.to_string();
        assert!(display.contains("/tmp/locked"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_listing_error_keeps_source_kind() {
        let err = HelloworldError::listing(
            "gone",
            io::Error::new(io::ErrorKind::NotFound, "vanished"),
        );
        if let HelloworldError::Listing { path, source } = err {
            assert_eq!(path, PathBuf::from("gone"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        } else {
            panic!("Expected Listing error");
        }
    }

    #[test]
    fn test_from_io_error_is_not_listing() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: HelloworldError = io_err.into();

        assert!(matches!(err, HelloworldError::Io { .. }));
        assert!(!err.is_listing_failure());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: HelloworldError = json_err.into();

        if let HelloworldError::Serialization { data_type, .. } = err {
            assert_eq!(data_type, Some("JSON".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<i32>("invalid: yaml: content").unwrap_err();
        let err: HelloworldError = yaml_err.into();

        assert!(matches!(err, HelloworldError::Serialization { .. }));
    }

    #[test]
    fn test_with_context_internal() {
        let err = HelloworldError::internal("Something went wrong").with_context("During dispatch");

        if let HelloworldError::Internal { context, .. } = err {
            assert_eq!(context, Some("During dispatch".to_string()));
        } else {
            panic!("Expected Internal error");
        }
    }

    #[test]
    fn test_result_ext_prefixes_io_message() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::InvalidInput, "Bad input"));

        let err = result.context("Reading document").unwrap_err();
        if let HelloworldError::Io { message, .. } = err {
            assert!(message.starts_with("Reading document"));
        } else {
            panic!("Expected Io error");
        }
    }

    #[test]
    fn test_result_ext_prefixes_serialization_message() {
        let result = serde_yaml::from_str::<i32>("not: [a number").context("Loading config");

        let err = result.unwrap_err();
        assert!(matches!(err, HelloworldError::Serialization { .. }));
        assert!(err.to_string().contains("Loading config: YAML serialization failed"));
    }

    #[test]
    fn test_with_context_keeps_listing_failure_intact() {
        let err = HelloworldError::listing(
            "/srv/locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        )
        .with_context("Enumerating workspace");

        assert!(err.is_listing_failure());
        assert!(err.to_string().starts_with("Failed to list directory /srv/locked"));
    }

    #[test]
    fn test_unknown_command_display() {
        let err = HelloworldError::unknown_command("helloworld.nope");
        assert_eq!(err.to_string(), "Unknown command: helloworld.nope");
    }
}
