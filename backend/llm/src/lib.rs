//! `cellmate-llm` — endpoint resolution and inference providers.

pub mod endpoint;
pub mod mock;
pub mod openai_compat;

pub use endpoint::{resolve_endpoint, ResolvedEndpoint, BLABLADOR_BASE_URL, OLLAMA_BASE_URL};
pub use mock::MockProvider;
pub use openai_compat::OpenAiCompatProvider;
