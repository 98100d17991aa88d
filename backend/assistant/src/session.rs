//! Per-session assistant state.
//!
//! One `Session` is constructed per interactive session and threaded by
//! reference through every operation; there is no process-global state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};
use uuid::Uuid;

use cellmate_core::{AssistantError, ChatMessage, LlmProvider, NamespaceValue};
use cellmate_config::{config_dir, config_file_path};
use cellmate_llm::{resolve_endpoint, OpenAiCompatProvider, ResolvedEndpoint};
use cellmate_notebook::NotebookHost;

use crate::prompts::banner_html;

type ProviderFactory = Box<dyn Fn(&ResolvedEndpoint) -> Arc<dyn LlmProvider> + Send + Sync>;

/// Options accepted by [`Session::init`]. All fields default to "not given".
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub model: Option<String>,
    pub auto_execute: bool,
    pub variables: Option<HashMap<String, NamespaceValue>>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub vision_model: Option<String>,
    pub keep_history: bool,
    pub silent: bool,
}

/// Mutable state of one assistant session.
pub struct Session {
    pub session_id: Uuid,
    pub model: Option<String>,
    pub vision_model: Option<String>,
    pub verbose: bool,
    pub auto_execute: bool,
    pub plugins_enabled: bool,
    pub seed: Option<u64>,
    pub temperature: Option<f32>,
    /// Ordered prior chat turns.
    pub chat: Vec<ChatMessage>,
    /// Snapshot of the host's variable bindings.
    pub namespace: HashMap<String, NamespaceValue>,
    pub endpoint: Option<ResolvedEndpoint>,
    config_path: PathBuf,
    /// Cached API client, dropped on every init.
    provider: Option<Arc<dyn LlmProvider>>,
    provider_factory: ProviderFactory,
}

impl Session {
    /// A fresh, uninitialized session using the default config location.
    pub fn new() -> Self {
        Self::with_config_path(config_file_path(&config_dir()))
    }

    pub fn with_config_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            model: None,
            vision_model: None,
            verbose: false,
            auto_execute: false,
            plugins_enabled: true,
            seed: None,
            temperature: None,
            chat: Vec::new(),
            namespace: HashMap::new(),
            endpoint: None,
            config_path: config_path.into(),
            provider: None,
            provider_factory: Box::new(|endpoint| {
                Arc::new(OpenAiCompatProvider::new(endpoint.clone()))
            }),
        }
    }

    /// Replace how API clients are constructed (tests use this to drop in a
    /// mock provider that survives re-initialization).
    pub fn with_provider_factory(
        mut self,
        factory: impl Fn(&ResolvedEndpoint) -> Arc<dyn LlmProvider> + Send + Sync + 'static,
    ) -> Self {
        self.provider_factory = Box::new(factory);
        self.provider = None;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.model.is_some()
    }

    pub fn enable_plugins(&mut self, enabled: bool) {
        self.plugins_enabled = enabled;
    }

    /// The active text model, once initialized.
    pub fn active_model(&self) -> Result<String, AssistantError> {
        self.model
            .clone()
            .ok_or_else(|| AssistantError::Config("session is not initialized".to_string()))
    }

    /// The active vision model, once initialized.
    pub fn active_vision_model(&self) -> Result<String, AssistantError> {
        self.vision_model
            .clone()
            .ok_or_else(|| AssistantError::Config("session is not initialized".to_string()))
    }

    /// The API client for the resolved endpoint, built lazily and cached.
    pub fn provider(&mut self) -> Arc<dyn LlmProvider> {
        if let Some(provider) = &self.provider {
            return provider.clone();
        }
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| resolve_endpoint(None, None));
        let provider = (self.provider_factory)(&endpoint);
        self.provider = Some(provider.clone());
        provider
    }

    /// Initialize (or re-initialize) the session.
    ///
    /// Loads the persisted model configuration, applies explicit overrides,
    /// persists the merged document, and resets session state. The chat
    /// history survives only with `keep_history`; the variable namespace is
    /// taken from the options, else snapshotted from the host, else left
    /// empty — never an error.
    pub async fn init(&mut self, host: &dyn NotebookHost, options: InitOptions) -> Result<()> {
        let config =
            cellmate_config::resolve(&self.config_path, options.model, options.vision_model)
                .await?;

        self.model = Some(config.model.clone());
        self.vision_model = Some(config.vision_model.clone());
        self.auto_execute = options.auto_execute;
        self.provider = None;

        self.namespace = match options.variables {
            Some(variables) => variables,
            None => host.namespace().unwrap_or_default(),
        };

        if !options.keep_history {
            self.chat.clear();
        }

        let endpoint = resolve_endpoint(options.endpoint.as_deref(), options.api_key);
        debug!(
            session = %self.session_id,
            model = %config.model,
            endpoint = %endpoint.label(),
            "Session initialized"
        );
        self.endpoint = Some(endpoint);

        if self.verbose {
            info!(
                "Assistant initialised. Ask something, e.g.: please generate a noisy \
grayscale image containing 10 blurry blobs with a diameter of 20 pixels each."
            );
        }

        if !options.silent {
            let endpoint_label = self
                .endpoint
                .as_ref()
                .map(|e| e.label().to_string())
                .unwrap_or_else(|| "openai".to_string());
            host.display_html(&banner_html(
                &config.model,
                &config.vision_model,
                &endpoint_label,
            ));
        }

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellmate_llm::MockProvider;
    use cellmate_notebook::RecordingHost;

    fn temp_config_path(dir: &tempfile::TempDir) -> PathBuf {
        config_file_path(dir.path())
    }

    #[tokio::test]
    async fn init_persists_explicit_model_for_later_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let host = RecordingHost::new();

        let mut first = Session::with_config_path(temp_config_path(&dir));
        first
            .init(
                &host,
                InitOptions { model: Some("model-x".into()), silent: true, ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(first.active_model().unwrap(), "model-x");

        // A second session with no explicit model picks up the stored one.
        let mut second = Session::with_config_path(temp_config_path(&dir));
        second
            .init(&host, InitOptions { silent: true, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(second.active_model().unwrap(), "model-x");
    }

    #[tokio::test]
    async fn init_resets_history_unless_kept() {
        let dir = tempfile::tempdir().unwrap();
        let host = RecordingHost::new();
        let mut session = Session::with_config_path(temp_config_path(&dir));

        session.chat.push(ChatMessage::user("earlier"));
        session
            .init(&host, InitOptions { keep_history: true, silent: true, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(session.chat.len(), 1);

        session
            .init(&host, InitOptions { silent: true, ..Default::default() })
            .await
            .unwrap();
        assert!(session.chat.is_empty());
    }

    #[tokio::test]
    async fn init_snapshots_host_namespace_when_no_variables_given() {
        let dir = tempfile::tempdir().unwrap();
        let host = RecordingHost::new()
            .with_variable("answer", NamespaceValue::Number(42.0));
        let mut session = Session::with_config_path(temp_config_path(&dir));

        session
            .init(&host, InitOptions { silent: true, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(session.namespace.get("answer"), Some(&NamespaceValue::Number(42.0)));
    }

    #[tokio::test]
    async fn banner_is_shown_unless_silent() {
        let dir = tempfile::tempdir().unwrap();
        let host = RecordingHost::new();
        let mut session = Session::with_config_path(temp_config_path(&dir));

        session.init(&host, InitOptions::default()).await.unwrap();
        let output = host.displayed_output();
        assert_eq!(output.len(), 1);
        assert!(output[0].contains("generated by artificial intelligence"));

        session
            .init(&host, InitOptions { silent: true, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(host.displayed_output().len(), 1);
    }

    #[tokio::test]
    async fn init_drops_the_cached_client() {
        let dir = tempfile::tempdir().unwrap();
        let host = RecordingHost::new();
        let mut session = Session::with_config_path(temp_config_path(&dir))
            .with_provider_factory(|_| Arc::new(MockProvider::new()));

        let before = session.provider();
        session
            .init(&host, InitOptions { silent: true, ..Default::default() })
            .await
            .unwrap();
        let after = session.provider();
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
