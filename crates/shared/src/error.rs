//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration or argument value is invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found (client file, input workbook).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source workbook does not have the expected layout.
    #[error("Source error: {0}")]
    Source(String),

    /// The journal could not be written.
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl AppError {
    /// Returns the process exit code for this error (BSD `sysexits` values).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 64,
            Self::Source(_) => 65,
            Self::NotFound(_) => 66,
            Self::Internal(_) => 70,
            Self::Export(_) | Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }

    /// Returns a stable error code for log records.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Source(_) => "SOURCE_ERROR",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
