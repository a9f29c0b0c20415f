use thiserror::Error;

/// Top-level error type for the skill.
#[derive(Debug, Error)]
pub enum SkillError {
    /// No registered request handler accepted the request.
    #[error("no handler found for request of type '{request_type}'")]
    NoHandler { request_type: String },

    /// The request did not carry a locale.
    #[error("request carries no locale")]
    MissingLocale,

    /// A string lookup ran before any language was selected.
    #[error("no language selected for this request")]
    LanguageNotSelected,

    /// A string table has no entry for the key.
    #[error("missing string '{key}' for language '{language}'")]
    MissingString { language: String, key: String },

    /// The request was addressed to a different skill.
    #[error("skill id mismatch: expected '{expected}', got '{actual}'")]
    SkillIdMismatch { expected: String, actual: String },

    /// Failure raised by a handler or interceptor.
    #[error("handler error: {0}")]
    Handler(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// String table could not be loaded.
    #[error("locale table error: {0}")]
    Locale(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
