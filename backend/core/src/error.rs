use thiserror::Error;

/// Top-level error type for the Cellmate runtime.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("could not parse task classification from model reply: {reply:?}")]
    UnparseableClassification { reply: String },

    #[error("LLM provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("notebook error: {0}")]
    Notebook(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
