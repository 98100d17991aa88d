use serde::{Deserialize, Serialize};

/// A fully-defined command entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key (e.g. "ask", "doc").
    pub key: String,
    pub description: String,
    /// Magic-style aliases (e.g. "%ask"); matched case-insensitively.
    pub aliases: Vec<String>,
    /// Whether the command consumes the cell body below the invocation line.
    pub accepts_cell: bool,
}

impl CommandDef {
    /// Primary alias (first in list), or the key if none.
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(|s| s.as_str()).unwrap_or(&self.key)
    }
}

/// Structured input to a command: the invocation line's remainder and the
/// cell body, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    pub line: Option<String>,
    pub cell: Option<String>,
}

/// Structured result of a command: an optional text message for the invoker.
/// Cell effects happen through the notebook host, not through this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub text: Option<String>,
}

impl CommandOutcome {
    pub fn message(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn silent() -> Self {
        Self { text: None }
    }
}

/// A detected command invocation, split into key + request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub raw_alias: String,
    pub request: CommandRequest,
}
