//! Command handlers wiring the registry to the assistant.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use cellmate_assistant::{document_cell, handle_prompt, InitOptions, Session};
use cellmate_commands::{CommandDispatcher, CommandHandler, CommandOutcome, CommandRequest};
use cellmate_notebook::{NotebookGenerator, NotebookHost};

pub struct AskHandler {
    pub session: Arc<Mutex<Session>>,
    pub host: Arc<dyn NotebookHost>,
    pub generator: Arc<dyn NotebookGenerator>,
}

#[async_trait]
impl CommandHandler for AskHandler {
    async fn handle(&self, request: &CommandRequest) -> Result<CommandOutcome> {
        let mut session = self.session.lock().await;
        handle_prompt(
            &mut session,
            self.host.as_ref(),
            self.generator.as_ref(),
            request.line.as_deref(),
            request.cell.as_deref(),
        )
        .await?;
        Ok(CommandOutcome::silent())
    }
}

pub struct DocHandler {
    pub session: Arc<Mutex<Session>>,
    pub host: Arc<dyn NotebookHost>,
}

#[async_trait]
impl CommandHandler for DocHandler {
    async fn handle(&self, request: &CommandRequest) -> Result<CommandOutcome> {
        let mut session = self.session.lock().await;
        document_cell(
            &mut session,
            self.host.as_ref(),
            request.line.as_deref(),
            request.cell.as_deref(),
        )
        .await?;
        Ok(CommandOutcome::silent())
    }
}

/// Re-initializes the assistant; the invocation line may carry a model name.
pub struct InitHandler {
    pub session: Arc<Mutex<Session>>,
    pub host: Arc<dyn NotebookHost>,
}

#[async_trait]
impl CommandHandler for InitHandler {
    async fn handle(&self, request: &CommandRequest) -> Result<CommandOutcome> {
        let mut session = self.session.lock().await;
        let options = InitOptions { model: request.line.clone(), ..Default::default() };
        session.init(self.host.as_ref(), options).await?;
        Ok(CommandOutcome::silent())
    }
}

/// Build the dispatcher with all built-in handlers registered.
pub fn build_dispatcher(
    session: Arc<Mutex<Session>>,
    host: Arc<dyn NotebookHost>,
    generator: Arc<dyn NotebookGenerator>,
) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(
        "ask",
        Arc::new(AskHandler {
            session: session.clone(),
            host: host.clone(),
            generator,
        }),
    );
    dispatcher.register("doc", Arc::new(DocHandler { session: session.clone(), host: host.clone() }));
    dispatcher.register("init", Arc::new(InitHandler { session, host }));
    dispatcher
}
