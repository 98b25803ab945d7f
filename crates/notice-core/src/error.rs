//! Unified application error types for the notification store.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Storage failures always use
//! [`ErrorKind::Database`] and carry the captured call stack.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The underlying row store failed, or the storage call was aborted.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error.
///
/// Record absence is never reported through this type; lookups return
/// `Option` instead.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Call stack captured when a storage fault was raised.
    stack: Option<Arc<Backtrace>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            stack: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
            stack: None,
        }
    }

    /// Wrap a row store failure, capturing the current call stack.
    pub fn storage_fault(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            stack: Some(Arc::new(Backtrace::force_capture())),
            ..Self::with_source(ErrorKind::Database, message, source)
        }
    }

    /// Create a database error without an underlying cause.
    ///
    /// Used when the storage call was aborted before it produced one.
    pub fn database(message: impl Into<String>) -> Self {
        Self {
            stack: Some(Arc::new(Backtrace::force_capture())),
            ..Self::new(ErrorKind::Database, message)
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is a storage fault.
    pub fn is_storage_fault(&self) -> bool {
        self.kind == ErrorKind::Database
    }

    /// The call stack captured for storage faults.
    pub fn stack(&self) -> Option<&Backtrace> {
        self.stack.as_deref()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
            stack: self.stack.clone(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
