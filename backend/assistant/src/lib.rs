//! `cellmate-assistant` — the assistant's brain.
//!
//! Holds the per-session state, turns user prompts into classified tasks,
//! generates responses, and pushes results back into the notebook through
//! the host seam.

pub mod dispatch;
pub mod doc;
pub mod generate;
pub mod prompts;
pub mod session;

pub use dispatch::{combine_user_input, handle_prompt};
pub use doc::document_cell;
pub use generate::{generate, generate_response_to_user};
pub use session::{InitOptions, Session};
