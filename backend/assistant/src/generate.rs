//! Response generation.

use anyhow::Result;
use tracing::debug;

use cellmate_core::{ChatMessage, ImageAttachment, LlmRequest};
use cellmate_markdown::extract_code;

use crate::prompts::assistant_system_prompt;
use crate::session::Session;

/// Send one inference request and return the raw reply text.
///
/// The chat history is passed explicitly so callers control what the model
/// sees (the classification call, for instance, sends none).
pub async fn generate(
    session: &mut Session,
    history: Vec<ChatMessage>,
    image: Option<ImageAttachment>,
    model: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let request = LlmRequest {
        model: model.to_string(),
        system_prompt: system_prompt.to_string(),
        user_prompt: user_prompt.to_string(),
        history,
        image,
        seed: session.seed,
        temperature: session.temperature,
    };
    let response = session.provider().complete(&request).await?;
    debug!(
        session = %session.session_id,
        model,
        tokens = response.tokens_used,
        latency_ms = response.latency_ms,
        "Model reply received"
    );
    Ok(response.content)
}

/// Ask the model on behalf of the user and split the reply into an optional
/// code block and the explanatory text. The exchange is appended to the
/// session's chat history.
///
/// Without a fenced code block in the reply, code is absent and the whole
/// reply is the text.
pub async fn generate_response_to_user(
    session: &mut Session,
    model: &str,
    user_prompt: &str,
    image: Option<ImageAttachment>,
) -> Result<(Option<String>, String)> {
    let history = session.chat.clone();
    let reply = generate(
        session,
        history,
        image,
        model,
        &assistant_system_prompt(),
        user_prompt,
    )
    .await?;

    session.chat.push(ChatMessage::user(user_prompt));
    session.chat.push(ChatMessage::assistant(&reply));

    let (code, text) = extract_code(&reply);
    Ok((code, text))
}
