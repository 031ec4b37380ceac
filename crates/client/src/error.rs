use thiserror::Error;

/// Why a generation call produced no site
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Raised at construction time, before any request is made
    #[error("No API key configured for the model provider")]
    MissingApiKey,

    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Request to model provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("No response text from model provider")]
    EmptyResponse,

    #[error("Model response does not match the site schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Model response contains no pages")]
    NoPages,
}
