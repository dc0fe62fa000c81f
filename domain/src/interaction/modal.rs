use crate::core::id::Snowflake;

/// One submitted text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalField {
    pub custom_id: String,
    pub value: String,
}

/// Payload of a modal submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSubmitData {
    pub custom_id: String,
    pub fields: Vec<ModalField>,
    /// Set when the modal was opened from a component on a message.
    pub message_id: Option<Snowflake>,
}

impl ModalSubmitData {
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            fields: Vec::new(),
            message_id: None,
        }
    }

    pub fn with_field(mut self, custom_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(ModalField {
            custom_id: custom_id.into(),
            value: value.into(),
        });
        self
    }

    pub fn from_message(mut self, message_id: Snowflake) -> Self {
        self.message_id = Some(message_id);
        self
    }

    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.custom_id == custom_id)
            .map(|field| field.value.as_str())
    }
}
