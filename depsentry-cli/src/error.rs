//! CLI-specific error types and exit code mapping

use depsentry_core::error::DepsentryError;
use depsentry_extractor::ExtractorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Manifest extraction failed for a specific file.
    #[error("{path}: {source}")]
    Extract {
        path: String,
        #[source]
        source: ExtractorError,
    },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Unsupported manifest format          |
    /// | 4    | Parse failure or no packages found   |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Extract { source, .. } => match source {
                ExtractorError::UnsupportedFormat { .. } => 3,
                ExtractorError::ParseFailure { .. } | ExtractorError::EmptyResult { .. } => 4,
                ExtractorError::Config { .. } => 2,
                ExtractorError::ContentTooLarge { .. }
                | ExtractorError::InvalidCoordinate { .. } => 1,
            },
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }

    /// Attach the manifest path to an extractor error.
    pub fn extract(path: impl Into<String>, source: ExtractorError) -> Self {
        Self::Extract {
            path: path.into(),
            source,
        }
    }
}

impl From<DepsentryError> for CliError {
    fn from(e: DepsentryError) -> Self {
        match e {
            DepsentryError::Config(e) => Self::Config(e.to_string()),
            DepsentryError::Io(e) => Self::Io(e),
            DepsentryError::Extract(e) => Self::Command(e.to_string()),
        }
    }
}
