use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use cellmate_core::{LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider for tests: replies are served from a scripted queue
/// and every received request is recorded.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<Vec<String>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned reply; replies are consumed in push order.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push(reply.into());
    }

    pub fn scripted(replies: &[&str]) -> Self {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(*reply);
        }
        mock
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        let content = if replies.is_empty() {
            "Mock response".to_string()
        } else {
            replies.remove(0)
        };
        Ok(LlmResponse {
            content,
            provider: "mock".to_string(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
