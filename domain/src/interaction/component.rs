use crate::core::id::Snowflake;

/// Component type code for a button.
pub const BUTTON_COMPONENT: u8 = 2;
/// Component type code for a string select menu.
pub const STRING_SELECT_COMPONENT: u8 = 3;

/// Payload of a component activation (button press, select menu choice).
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentData {
    pub custom_id: String,
    pub component_type: u8,
    /// Selected values for select menus; empty for buttons.
    pub values: Vec<String>,
    /// The message the component is attached to.
    pub message_id: Snowflake,
}

impl ComponentData {
    pub fn button(custom_id: impl Into<String>, message_id: Snowflake) -> Self {
        Self {
            custom_id: custom_id.into(),
            component_type: BUTTON_COMPONENT,
            values: Vec::new(),
            message_id,
        }
    }

    pub fn string_select(
        custom_id: impl Into<String>,
        message_id: Snowflake,
        values: Vec<String>,
    ) -> Self {
        Self {
            custom_id: custom_id.into(),
            component_type: STRING_SELECT_COMPONENT,
            values,
            message_id,
        }
    }

    pub fn is_button(&self) -> bool {
        self.component_type == BUTTON_COMPONENT
    }
}
