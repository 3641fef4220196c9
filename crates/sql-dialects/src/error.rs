//! Error types for the platform layer.

use thiserror::Error;

/// Main error type for SQL generation.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The requested construct does not exist on this dialect.
    #[error("Operation '{operation}' is not supported by platform {platform}")]
    NotSupported { operation: String, platform: String },

    /// Malformed or incomplete schema model (index without columns, etc.)
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Bad call-site parameter (negative offset, unknown referential action, etc.)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reverse type lookup found no abstract type for a database type name
    #[error("Unknown database type '{db_type}' requested, platform {platform} may not support it")]
    UnknownColumnType { db_type: String, platform: String },

    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub const EXIT_CONFIG_ERROR: u8 = 1;
pub const EXIT_NOT_SUPPORTED: u8 = 2;
pub const EXIT_INVALID_DEFINITION: u8 = 3;
pub const EXIT_INVALID_ARGUMENT: u8 = 4;
pub const EXIT_UNKNOWN_TYPE: u8 = 5;
pub const EXIT_JSON_ERROR: u8 = 6;
pub const EXIT_IO_ERROR: u8 = 7;

impl PlatformError {
    /// Create a NotSupported error for an operation on a platform.
    pub fn not_supported(operation: impl Into<String>, platform: impl Into<String>) -> Self {
        PlatformError::NotSupported {
            operation: operation.into(),
            platform: platform.into(),
        }
    }

    /// Create an InvalidDefinition error.
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        PlatformError::InvalidDefinition(message.into())
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PlatformError::InvalidArgument(message.into())
    }

    /// Create an UnknownColumnType error.
    pub fn unknown_column_type(db_type: impl Into<String>, platform: impl Into<String>) -> Self {
        PlatformError::UnknownColumnType {
            db_type: db_type.into(),
            platform: platform.into(),
        }
    }

    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlatformError::Config(_) | PlatformError::Yaml(_) => EXIT_CONFIG_ERROR,
            PlatformError::NotSupported { .. } => EXIT_NOT_SUPPORTED,
            PlatformError::InvalidDefinition(_) => EXIT_INVALID_DEFINITION,
            PlatformError::InvalidArgument(_) => EXIT_INVALID_ARGUMENT,
            PlatformError::UnknownColumnType { .. } => EXIT_UNKNOWN_TYPE,
            PlatformError::Json(_) => EXIT_JSON_ERROR,
            PlatformError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_supported_message() {
        let err = PlatformError::not_supported("create sequence", "mysql");
        assert_eq!(
            err.to_string(),
            "Operation 'create sequence' is not supported by platform mysql"
        );
        assert_eq!(err.exit_code(), EXIT_NOT_SUPPORTED);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            PlatformError::invalid_definition("x").exit_code(),
            EXIT_INVALID_DEFINITION
        );
        assert_eq!(
            PlatformError::invalid_argument("x").exit_code(),
            EXIT_INVALID_ARGUMENT
        );
        assert_eq!(PlatformError::Config("x".into()).exit_code(), EXIT_CONFIG_ERROR);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(PlatformError::from(io).exit_code(), EXIT_IO_ERROR);
    }

    #[test]
    fn test_format_detailed_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "schema.yaml missing");
        let err = PlatformError::from(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error"));
    }
}
