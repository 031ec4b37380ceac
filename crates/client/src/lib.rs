pub mod error;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use sitecraft_core::GeneratedSite;

pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use prompt::{compose_prompt, instruction, response_schema};

/// A capability that turns a prompt into a structured site.
///
/// Each call issues at most one request to the underlying provider.
#[async_trait]
pub trait SiteGenerator: Send + Sync {
    async fn generate_site(&self, prompt: &str) -> Result<GeneratedSite, GenerationError>;
}
