use serde::{Deserialize, Serialize};

use crate::types::response::component::ComponentType;

/// Data of a MESSAGE_COMPONENT interaction: a button press or a select.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageComponentData {
    /// Developer-chosen ID of the component that was used.
    pub custom_id: String,
    pub component_type: ComponentType,
    /// Chosen options, for select menus only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}
