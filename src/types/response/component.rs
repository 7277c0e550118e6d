//! Message components: action rows and the buttons inside them.

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use serde_repr::Serialize_repr;

/// Wire code of a component kind.
///
/// Also decoded from incoming component and modal interactions, where
/// codes newer than this crate are kept as [`ComponentType::Unknown`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum ComponentType {
    ActionRow,
    Button,
    SelectMenu,
    TextInput,
    Unknown(u16),
}

impl From<u16> for ComponentType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::SelectMenu,
            4 => Self::TextInput,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ComponentType> for u16 {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
            ComponentType::SelectMenu => 3,
            ComponentType::TextInput => 4,
            ComponentType::Unknown(unknown) => unknown,
        }
    }
}

/// Visual style of a button.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    /// Opens a URL instead of sending an interaction.
    Link = 5,
}

/// A leaf component.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Component {
    /// Button that navigates to `url`.
    LinkButton { label: String, url: String },
    /// Button that sends a MESSAGE_COMPONENT interaction carrying
    /// `custom_id`.
    Button {
        style: ButtonStyle,
        label: String,
        custom_id: String,
    },
}

impl Component {
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::LinkButton { .. } | Self::Button { .. } => ComponentType::Button,
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::LinkButton { label, url } => {
                let mut state = serializer.serialize_struct("Component", 4)?;
                state.serialize_field("type", &self.kind())?;
                state.serialize_field("style", &ButtonStyle::Link)?;
                state.serialize_field("label", label)?;
                state.serialize_field("url", url)?;
                state.end()
            }
            Self::Button {
                style,
                label,
                custom_id,
            } => {
                let mut state = serializer.serialize_struct("Component", 4)?;
                state.serialize_field("type", &self.kind())?;
                state.serialize_field("style", style)?;
                state.serialize_field("label", label)?;
                state.serialize_field("custom_id", custom_id)?;
                state.end()
            }
        }
    }
}

/// A horizontal row of components.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.components.push(Component::LinkButton {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    pub fn button(
        mut self,
        style: ButtonStyle,
        label: impl Into<String>,
        custom_id: impl Into<String>,
    ) -> Self {
        self.components.push(Component::Button {
            style,
            label: label.into(),
            custom_id: custom_id.into(),
        });
        self
    }
}

impl Serialize for ActionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.components.is_empty() { 1 } else { 2 };
        let mut state = serializer.serialize_struct("ActionRow", len)?;
        state.serialize_field("type", &ComponentType::ActionRow)?;
        if self.components.is_empty() {
            state.skip_field("components")?;
        } else {
            state.serialize_field("components", &self.components)?;
        }
        state.end()
    }
}
