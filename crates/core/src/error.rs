use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// No credential for the model provider was configured.
    #[error(
        "No API key configured. Set SITECRAFT_API_KEY (or GEMINI_API_KEY) or run 'sitecraft configure'"
    )]
    MissingApiKey,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
