//! Built-in command registry.

use crate::types::CommandDef;

/// Build the full built-in command registry.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: "ask".into(),
            description: "Send a prompt to the assistant; generated code lands in the next cell.".into(),
            aliases: vec!["%ask".into(), "%%ask".into()],
            accepts_cell: true,
        },
        CommandDef {
            key: "doc".into(),
            description: "Add comments and docstrings to the current cell's code.".into(),
            aliases: vec!["%doc".into(), "%%doc".into()],
            accepts_cell: true,
        },
        CommandDef {
            key: "init".into(),
            description: "Initialize the assistant (model, endpoint, credentials).".into(),
            aliases: vec!["%init".into()],
            accepts_cell: false,
        },
    ]
}

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    /// Register an additional command (e.g. plugin-provided).
    pub fn register(&mut self, def: CommandDef) {
        self.commands.push(def);
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Find a command by alias (e.g. "%ask").
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        let lower = alias.to_lowercase();
        self.commands
            .iter()
            .find(|c| c.aliases.iter().any(|a| a.to_lowercase() == lower))
    }

    /// Find a command by its key.
    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.key == key)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_findable_by_alias_and_key() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_by_alias("%ask").unwrap().key, "ask");
        assert_eq!(registry.find_by_alias("%%ASK").unwrap().key, "ask");
        assert_eq!(registry.find_by_key("doc").unwrap().primary_alias(), "%doc");
        assert!(registry.find_by_alias("%unknown").is_none());
    }

    #[test]
    fn plugin_commands_can_be_registered() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDef {
            key: "segment".into(),
            description: "Custom segmentation command.".into(),
            aliases: vec!["%segment".into()],
            accepts_cell: true,
        });
        assert!(registry.find_by_alias("%segment").is_some());
    }
}
