//! Error types and context management for automaton and image operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all encoding, decoding and wire-format operations
#[derive(Debug)]
pub enum QuadfaError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Source data doesn't meet raster requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Serialized automaton text could not be turned into an automaton
    ///
    /// Raised eagerly while parsing; no partially built automaton escapes.
    MalformedWireFormat {
        /// File the text came from, when known
        path: Option<PathBuf>,
        /// Description of the offending field or token
        reason: String,
    },

    /// Automaton structure cannot support the requested operation
    ///
    /// Covers missing initial states, missing transitions met during
    /// traversal and references to states the automaton does not own.
    InvalidAutomaton {
        /// Description of the structural problem
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Automaton could not be rendered to JSON text
    Serialization {
        /// Underlying serializer error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for QuadfaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::MalformedWireFormat { path, reason } => match path {
                Some(path) => write!(
                    f,
                    "Malformed automaton in '{}': {reason}",
                    path.display()
                ),
                None => write!(f, "Malformed automaton: {reason}"),
            },
            Self::InvalidAutomaton { reason } => {
                write!(f, "Invalid automaton: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Serialization { source } => {
                write!(f, "Failed to serialize automaton: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for QuadfaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::Serialization { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, QuadfaError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File being processed when the error occurred
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the file being processed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the file path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path context applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<QuadfaError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors raised without knowing their file benefit from a path
            match &mut error {
                QuadfaError::MalformedWireFormat { path, .. } => {
                    if path.is_none() {
                        path.clone_from(&context.path);
                    }
                }
                QuadfaError::ImageLoad { path, .. }
                | QuadfaError::ImageExport { path, .. } => {
                    if let Some(known) = &context.path
                        && path.as_os_str() == UNKNOWN_PATH
                    {
                        path.clone_from(known);
                    }
                }
                QuadfaError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(known) = &context.path
                        && path.as_os_str() == UNKNOWN_PATH
                    {
                        path.clone_from(known);
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            ..Default::default()
        })
    }
}

const UNKNOWN_PATH: &str = "<unknown>";

impl From<image::ImageError> for QuadfaError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for QuadfaError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for QuadfaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuadfaError {
    QuadfaError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a wire-format error not yet tied to a file
pub fn malformed(reason: &impl ToString) -> QuadfaError {
    QuadfaError::MalformedWireFormat {
        path: None,
        reason: reason.to_string(),
    }
}

/// Create an invalid automaton error
pub fn invalid_automaton(reason: &impl ToString) -> QuadfaError {
    QuadfaError::InvalidAutomaton {
        reason: reason.to_string(),
    }
}
