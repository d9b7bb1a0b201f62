use thiserror::Error;

/// Error type returned by validators and carried inside [`EnvbindError::Validation`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EnvbindError {
    #[error("Cannot use empty `key` option")]
    InvalidKeyOption,

    #[error("Cannot use `key` option when binding a whole entity")]
    KeyOptionAtEntityScope,

    #[error("Scope can only be applied to a whole entity, not to field '{0}'")]
    ScopeMisuse(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Validation failed for '{field}' (key {key}): {source}")]
    Validation {
        field: String,
        key: String,
        source: BoxError,
    },

    #[error("Failed to convert config values: {0}")]
    Convert(#[from] serde_json::Error),

    #[error("Invalid scope overrides: {0}")]
    InvalidOverrides(String),
}
