//! LLM-backed notebook generation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use cellmate_core::{AssistantError, ImageAttachment, LlmProvider, LlmRequest};
use cellmate_markdown::split_segments;

use crate::document::{read_notebook, write_notebook, NotebookDocument};

/// Produces or modifies a notebook file on disk and returns its filename.
#[async_trait]
pub trait NotebookGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
        modify_existing: bool,
    ) -> Result<String>;
}

static IPYNB_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w\-./\\]+\.ipynb").expect("valid filename pattern"));

/// First `*.ipynb` token mentioned in a prompt, if any.
pub fn filename_from_prompt(prompt: &str) -> Option<String> {
    IPYNB_TOKEN.find(prompt).map(|m| m.as_str().to_string())
}

const NOTEBOOK_SYSTEM_PROMPT: &str = "\
You are a notebook assistant. Answer with a complete notebook walkthrough: \
alternate short markdown explanations with fenced ```python code blocks. \
Every code block becomes one code cell, every piece of prose becomes one \
markdown cell. Do not number the cells.";

/// Generator that asks the model for a walkthrough and writes the reply as
/// an ipynb file.
pub struct LlmNotebookGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    out_dir: PathBuf,
}

impl LlmNotebookGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self { provider, model: model.into(), out_dir: PathBuf::from(".") }
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    fn fallback_filename() -> String {
        format!("generated_{}.ipynb", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    }
}

#[async_trait]
impl NotebookGenerator for LlmNotebookGenerator {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageAttachment>,
        modify_existing: bool,
    ) -> Result<String> {
        let named = filename_from_prompt(prompt);

        let mut user_prompt = prompt.to_string();
        if modify_existing {
            let filename = named.clone().ok_or_else(|| {
                AssistantError::Notebook(
                    "modification requested but the prompt names no .ipynb file".to_string(),
                )
            })?;
            let existing = read_notebook(&self.out_dir.join(&filename)).await?;
            let sources: Vec<String> = existing
                .cells
                .iter()
                .map(|cell| {
                    if cell.is_code() {
                        format!("```python\n{}\n```", cell.source_text())
                    } else {
                        cell.source_text()
                    }
                })
                .collect();
            user_prompt = format!(
                "{}\n\nThis is the current content of {}:\n\n{}",
                prompt,
                filename,
                sources.join("\n\n")
            );
            debug!(file = %filename, "Including existing notebook in prompt");
        }

        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: NOTEBOOK_SYSTEM_PROMPT.to_string(),
            user_prompt,
            image: image.cloned(),
            ..Default::default()
        };
        let reply = self.provider.complete(&request).await?;

        let document = NotebookDocument::from_segments(&split_segments(&reply.content));
        let filename = named.unwrap_or_else(Self::fallback_filename);
        write_notebook(&document, &self.out_dir.join(&filename)).await?;
        info!(file = %filename, modify = modify_existing, "Notebook generated");
        Ok(filename)
    }
}
