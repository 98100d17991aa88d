//! Command detection in raw cell text.
//!
//! A command invocation is a first line starting with a registered alias,
//! e.g. `%ask make a histogram of img` or
//! `%%doc` followed by the code to document in the cell body.

use crate::registry::CommandRegistry;
use crate::types::{CommandInvocation, CommandRequest};

/// Detect a command at the start of a raw cell.
/// Returns `None` if the text is not a command invocation.
pub fn detect_command(text: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    let mut lines = text.splitn(2, '\n');
    let first = lines.next()?.trim();
    if !first.starts_with('%') {
        return None;
    }

    let (alias_part, rest_of_line) = first
        .split_once(|c: char| c.is_whitespace())
        .map(|(a, r)| (a, r.trim()))
        .unwrap_or((first, ""));

    let def = registry.find_by_alias(alias_part)?;

    let line = (!rest_of_line.is_empty()).then(|| rest_of_line.to_string());
    let cell = if def.accepts_cell {
        lines
            .next()
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    Some(CommandInvocation {
        key: def.key.clone(),
        raw_alias: alias_part.to_string(),
        request: CommandRequest { line, cell },
    })
}
