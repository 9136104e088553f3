use crate::types::TypeParseError;

/// Errors that can occur while building a schema registry
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A type with the same name was already registered
    #[error("Type '{0}' is already registered")]
    DuplicateType(String),

    /// I/O error reading a schema file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A type expression could not be parsed
    #[error("Invalid type expression: {0}")]
    InvalidType(#[from] TypeParseError),
}
