use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use cellmate_core::{ImageAttachment, LlmProvider, LlmRequest, LlmResponse, Role};

use crate::endpoint::ResolvedEndpoint;

/// Chat-completion provider speaking the OpenAI-compatible wire contract.
///
/// Works against any resolved endpoint (the default provider, the managed
/// gateway, or a local Ollama instance). Image attachments ride as
/// base64 data-URL content parts on the user turn.
pub struct OpenAiCompatProvider {
    client: Client,
    endpoint: ResolvedEndpoint,
}

impl OpenAiCompatProvider {
    pub fn new(endpoint: ResolvedEndpoint) -> Self {
        Self { client: Client::new(), endpoint }
    }

    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    /// `content` is a plain string, or an array of content parts when an
    /// image is attached.
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn user_turn(prompt: &str, image: Option<&ImageAttachment>) -> serde_json::Value {
    match image {
        None => json!({ "role": "user", "content": prompt }),
        Some(att) => {
            let b64 = STANDARD.encode(&att.data);
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:{};base64,{}", att.mime_type, b64) } }
                ]
            })
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();

        let mut messages = Vec::new();
        if !request.system_prompt.is_empty() {
            messages.push(json!({ "role": "system", "content": request.system_prompt }));
        }
        for turn in &request.history {
            messages.push(json!({ "role": role_name(turn.role), "content": turn.content }));
        }
        messages.push(user_turn(&request.user_prompt, request.image.as_ref()));

        let body = ChatRequest {
            model: request.model.clone(),
            messages,
            seed: request.seed,
            temperature: request.temperature,
        };

        debug!(
            endpoint = %self.endpoint.label(),
            model = %request.model,
            with_image = request.image.is_some(),
            "Sending chat-completion request"
        );

        let mut req = self
            .client
            .post(format!("{}/chat/completions", self.endpoint.base_url))
            .json(&body);
        if let Some(key) = &self.endpoint.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .with_context(|| format!("Chat request to {} failed", self.endpoint.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Endpoint {} returned {}: {}", self.endpoint.label(), status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat-completion response")?;

        let content = chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let tokens_used = chat_response
            .usage
            .and_then(|u| u.total_tokens)
            .unwrap_or(0);

        Ok(LlmResponse {
            content,
            provider: self.name().to_string(),
            model: request.model.clone(),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_without_image_is_plain_text() {
        let turn = user_turn("hello", None);
        assert_eq!(turn["content"], "hello");
    }

    #[test]
    fn user_turn_with_image_carries_data_url_part() {
        let att = ImageAttachment::png(vec![0, 1, 2]);
        let turn = user_turn("what is this?", Some(&att));
        let parts = turn["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        let url = parts[1]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn optional_sampling_fields_are_omitted() {
        let body = ChatRequest {
            model: "m".into(),
            messages: vec![],
            seed: None,
            temperature: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("seed").is_none());
        assert!(value.get("temperature").is_none());
    }
}
