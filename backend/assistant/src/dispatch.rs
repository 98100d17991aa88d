//! Prompt dispatch.
//!
//! Entry point for user prompts: combines the line/cell input, classifies
//! the requested task with an auxiliary model call, and routes to code/text
//! generation or the notebook generator. Results go back into the notebook
//! through the host.

use anyhow::Result;
use tracing::{debug, info};

use cellmate_core::{ImageAttachment, TaskKind};
use cellmate_notebook::{NotebookGenerator, NotebookHost};

use crate::generate::{generate, generate_response_to_user};
use crate::prompts::{image_context_prompt, task_selection_prompt};
use crate::session::{InitOptions, Session};

/// Combine the short `line` and the multi-line `cell` into one prompt.
/// Empty strings count as absent.
pub fn combine_user_input(line: Option<&str>, cell: Option<&str>) -> Option<String> {
    let line = line.filter(|s| !s.is_empty());
    let cell = cell.filter(|s| !s.is_empty());
    match (line, cell) {
        (Some(line), Some(cell)) => Some(format!("{line}\n{cell}")),
        (Some(line), None) => Some(line.to_string()),
        (None, Some(cell)) => Some(cell.to_string()),
        (None, None) => None,
    }
}

fn lookup_image_binding(
    session: &Session,
    line: Option<&str>,
) -> Option<(String, Option<ImageAttachment>)> {
    line.and_then(|name| session.namespace.get(name).map(|value| (name, value)))
        .filter(|(_, value)| value.is_image_like())
        .map(|(name, value)| (name.to_string(), value.as_image().cloned()))
}

/// Handle one user invocation.
///
/// Classification is trusted verbatim: the branch chosen is whatever the
/// model replied, with no cross-check against the prompt. A reply that does
/// not parse as a task number is a hard failure for this invocation, and
/// provider errors propagate uncaught. No retries.
pub async fn handle_prompt(
    session: &mut Session,
    host: &dyn NotebookHost,
    notebook_generator: &dyn NotebookGenerator,
    line: Option<&str>,
    cell: Option<&str>,
) -> Result<()> {
    let user_input = match combine_user_input(line, cell) {
        Some(input) => input,
        None => {
            host.display_text("Please ask a question!");
            return Ok(());
        }
    };

    // When the line names an image-like variable, remember the binding.
    let mut image_binding = lookup_image_binding(session, line);

    if !session.is_initialized() {
        session.init(host, InitOptions::default()).await?;
        // The lazy init just snapshotted the host namespace, so the line may
        // name a variable that was invisible a moment ago.
        if image_binding.is_none() {
            image_binding = lookup_image_binding(session, line);
        }
    }

    let model = session.active_model()?;
    let classification = generate(
        session,
        Vec::new(),
        None,
        &model,
        "",
        &task_selection_prompt(&user_input),
    )
    .await?;
    let task = TaskKind::parse_reply(&classification)?;
    debug!(session = %session.session_id, ?task, "Prompt classified");

    let image = image_binding.as_ref().and_then(|(_, att)| att.clone());
    let (code, text) = match task {
        TaskKind::NotebookGeneration => {
            let filename = notebook_generator
                .generate(&user_input, image.as_ref(), false)
                .await?;
            (None, format!("A notebook has been saved as [{filename}]({filename})."))
        }
        TaskKind::NotebookModification => {
            let filename = notebook_generator
                .generate(&user_input, image.as_ref(), true)
                .await?;
            (None, format!("The modified notebook has been saved as [{filename}]({filename})."))
        }
        TaskKind::CodeGeneration | TaskKind::TextResponse => {
            let model = if image_binding.is_some() {
                session.active_vision_model()?
            } else {
                model.clone()
            };
            let (code, text) =
                generate_response_to_user(session, &model, &user_input, image.clone()).await?;

            if let Some((name, _)) = &image_binding {
                // Put the image description on record for later turns; the
                // model's acknowledgement itself is discarded.
                let follow_up = image_context_prompt(name, &classification);
                let _ = generate_response_to_user(session, &model, &follow_up, None).await?;
            }
            (code, text)
        }
    };

    // The explanation is shown unless generated code is about to replace the
    // cell and run on its own.
    if code.is_none() || !session.auto_execute {
        host.display_text(&text);
    }

    if let Some(code) = code {
        if session.auto_execute {
            info!(session = %session.session_id, "Replacing and executing generated code");
            host.set_next_cell(&code, true);
            host.run_cell(&code).await?;
        } else {
            host.set_next_cell(&code, false);
        }
    }

    Ok(())
}
