use crate::core::id::Snowflake;

/// A partially typed command option sent with an autocomplete request.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteOption {
    pub name: String,
    pub value: serde_json::Value,
    /// Set on the option the user is currently typing.
    pub focused: bool,
}

/// Payload of an autocomplete request.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteData {
    pub command_id: Snowflake,
    pub command_name: String,
    pub options: Vec<AutocompleteOption>,
}

impl AutocompleteData {
    pub fn new(command_id: Snowflake, command_name: impl Into<String>) -> Self {
        Self {
            command_id,
            command_name: command_name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
        focused: bool,
    ) -> Self {
        self.options.push(AutocompleteOption {
            name: name.into(),
            value: value.into(),
            focused,
        });
        self
    }

    /// The option being completed.
    pub fn focused(&self) -> Option<&AutocompleteOption> {
        self.options.iter().find(|option| option.focused)
    }
}
