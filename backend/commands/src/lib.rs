//! `cellmate-commands` — named assistant entry points.
//!
//! The assistant's commands live in an explicit registry instead of being
//! injected into a host runtime's command table: each command takes a
//! structured request and returns a structured result, so any host (notebook
//! kernel, terminal, tests) can drive them the same way.

pub mod detection;
pub mod dispatch;
pub mod registry;
pub mod types;

pub use detection::detect_command;
pub use dispatch::{CommandDispatcher, CommandHandler};
pub use registry::{builtin_commands, CommandRegistry};
pub use types::{CommandDef, CommandInvocation, CommandOutcome, CommandRequest};
