use crate::core::id::Snowflake;

/// Which surface invoked an application command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Slash command typed in the chat box.
    ChatInput,
    /// Context menu command on a user.
    User,
    /// Context menu command on a message.
    Message,
}

/// A resolved option value passed to a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: serde_json::Value,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload of a command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandData {
    pub command_id: Snowflake,
    pub name: String,
    pub kind: CommandKind,
    pub options: Vec<CommandOption>,
    /// Target user or message for context menu commands.
    pub target_id: Option<Snowflake>,
}

impl CommandData {
    pub fn chat_input(command_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            command_id,
            name: name.into(),
            kind: CommandKind::ChatInput,
            options: Vec::new(),
            target_id: None,
        }
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn option(&self, name: &str) -> Option<&serde_json::Value> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    /// String value of the named option, if present and a string.
    pub fn str_option(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(|value| value.as_str())
    }
}
