//! Symbolic endpoint resolution.
//!
//! Pure mapping from an endpoint name plus optional credential to a concrete
//! base URL and credential. No network calls, no reachability checks; a
//! missing credential surfaces only once a request is actually attempted.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Managed inference gateway (Helmholtz Blablador).
pub const BLABLADOR_BASE_URL: &str = "https://helmholtz-blablador.fz-juelich.de:8000/v1";
/// Local self-hosted gateway (Ollama's OpenAI-compatible API).
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
/// Default commercial provider.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// A resolved (base-URL, credential) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEndpoint {
    /// The symbolic name that was requested, if any.
    pub name: Option<String>,
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ResolvedEndpoint {
    /// Short label for banners and logs.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("openai")
    }
}

/// Map a symbolic endpoint name (or none) plus optional API key to a
/// concrete base URL and credential.
///
/// Recognized names: `blablador`, `ollama`. A name that looks like a URL is
/// used as the base URL directly. Anything else (including `None`) falls
/// back to the default provider, taking the credential from
/// `OPENAI_API_KEY` when none was supplied.
pub fn resolve_endpoint(name: Option<&str>, api_key: Option<String>) -> ResolvedEndpoint {
    let resolved = match name.map(|n| n.trim().to_lowercase()) {
        Some(n) if n == "blablador" => ResolvedEndpoint {
            name: Some(n),
            base_url: BLABLADOR_BASE_URL.to_string(),
            api_key,
        },
        Some(n) if n == "ollama" => ResolvedEndpoint {
            name: Some(n),
            base_url: OLLAMA_BASE_URL.to_string(),
            api_key,
        },
        Some(n) if n.starts_with("http") => ResolvedEndpoint {
            name: name.map(str::to_string),
            base_url: n,
            api_key,
        },
        _ => ResolvedEndpoint {
            name: None,
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok()),
        },
    };
    debug!(endpoint = %resolved.label(), base_url = %resolved.base_url, "Resolved endpoint");
    resolved
}
