pub mod config;
pub mod error;
pub mod types;

pub use config::{ProviderConfig, ServerConfig, Settings};
pub use error::{Error, Result};
pub use types::*;
