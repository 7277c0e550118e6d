use serde::{Deserialize, Serialize};

use crate::types::response::component::ComponentType;

/// Data of a MODAL_SUBMIT interaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModalData {
    /// ID the modal was opened with.
    pub custom_id: String,
    pub components: Vec<ModalActionRow>,
}

impl ModalData {
    /// Submitted value of the input `custom_id`, searching every row.
    pub fn value(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| &row.components)
            .find(|component| component.custom_id == custom_id)
            .and_then(|component| component.value.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModalActionRow {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub components: Vec<ModalComponent>,
}

/// A submitted input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModalComponent {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
