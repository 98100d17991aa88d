use anyhow::Result;
use async_trait::async_trait;

use crate::message::ChatMessage;
use crate::types::ImageAttachment;

/// Trait for LLM providers used by the assistant.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openai-compat", "mock").
    fn name(&self) -> &str;

    /// Send one completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Prior conversation turns, sent between system and user prompt.
    pub history: Vec<ChatMessage>,
    /// Optional image attached to the user turn (vision models only).
    pub image: Option<ImageAttachment>,
    pub seed: Option<u64>,
    pub temperature: Option<f32>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
