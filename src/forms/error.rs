//! Error types for the form engine

use thiserror::Error;

/// Errors raised by schema loading and controller commands.
///
/// Field-level validation failures are not errors in this sense: they are
/// reported as [`ValidationError`](super::ValidationError) values and only
/// block submission.
#[derive(Debug, Error)]
pub enum FormError {
    /// A command named a field the schema does not declare
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Two descriptors share the same name
    #[error("Duplicate field name '{name}' in sections {first} and {second}")]
    DuplicateField {
        name: String,
        first: usize,
        second: usize,
    },

    /// Row and section metadata arrays are not aligned
    #[error("Schema has {rows} field rows but {sections} section headers")]
    SectionMismatch { rows: usize, sections: usize },

    /// A `pattern` rule does not compile
    #[error("Invalid pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A file command targeted a field that is not an image field
    #[error("Field '{0}' does not accept files")]
    NotAFileField(String),

    /// A sub-list command targeted a field that is not a repeatable group
    #[error("Field '{0}' is not a repeatable group")]
    NotARepeatableGroup(String),

    /// Schema file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for FormError {
    fn from(err: serde_yaml::Error) -> Self {
        FormError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for FormError {
    fn from(err: toml::de::Error) -> Self {
        FormError::Parse(err.to_string())
    }
}

/// Errors returned by a remote page fetcher
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// Transport failed before a response arrived
    #[error("Request failed: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}
