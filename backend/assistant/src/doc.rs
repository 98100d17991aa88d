//! The `doc` command: annotate the current cell's code.

use anyhow::Result;
use tracing::debug;

use cellmate_notebook::NotebookHost;

use crate::dispatch::combine_user_input;
use crate::generate::generate_response_to_user;
use crate::prompts::documentation_prompt;
use crate::session::{InitOptions, Session};

/// Ask the model for inline comments and docstrings on the invoking cell's
/// code, and replace that cell with the annotated version.
///
/// Narrower than the main dispatch path: always replace, never insert below,
/// no auto-execute branch, no task classification.
pub async fn document_cell(
    session: &mut Session,
    host: &dyn NotebookHost,
    line: Option<&str>,
    cell: Option<&str>,
) -> Result<()> {
    let code = match combine_user_input(line, cell) {
        Some(code) => code,
        None => {
            host.display_text("Please provide code to document!");
            return Ok(());
        }
    };

    if !session.is_initialized() {
        session.init(host, InitOptions::default()).await?;
    }
    // The namespace may have changed since init; take a fresh snapshot.
    if let Ok(namespace) = host.namespace() {
        session.namespace = namespace;
    }

    let model = session.active_model()?;
    let prompt = documentation_prompt(&code);
    let (annotated, text) = generate_response_to_user(session, &model, &prompt, None).await?;
    debug!(session = %session.session_id, has_code = annotated.is_some(), "Documentation reply");

    match annotated {
        Some(annotated) => host.set_next_cell(&annotated, true),
        None => host.display_text(&text),
    }
    Ok(())
}
