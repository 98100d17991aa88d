//! Command dispatch — route invocations to handler implementations.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::types::{CommandOutcome, CommandRequest};

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, request: &CommandRequest) -> Result<CommandOutcome>;
}

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub async fn dispatch(&self, key: &str, request: &CommandRequest) -> Result<CommandOutcome> {
        match self.handlers.get(key) {
            Some(handler) => {
                info!(command = key, "Dispatching command");
                handler.handle(request).await
            }
            None => Ok(CommandOutcome::message(format!(
                "No handler registered for command '{key}'"
            ))),
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(&self, request: &CommandRequest) -> Result<CommandOutcome> {
            Ok(CommandOutcome::message(request.line.clone().unwrap_or_default()))
        }
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register("ask", Arc::new(Echo));

        let request = CommandRequest { line: Some("hello".into()), cell: None };
        let outcome = dispatcher.dispatch("ask", &request).await.unwrap();
        assert_eq!(outcome.text.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn unknown_key_is_a_soft_error() {
        let dispatcher = CommandDispatcher::new();
        let outcome = dispatcher.dispatch("nope", &CommandRequest::default()).await.unwrap();
        assert!(outcome.text.unwrap().contains("No handler registered"));
    }
}
