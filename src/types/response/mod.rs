//! Outgoing interaction responses.
//!
//! A response is built once, by a handler, and serialized once into the
//! body of the webhook reply:
//!
//! ```json
//! {"type": 4, "data": {"content": "...", "components": [...], "flags": 64}}
//! ```
//!
//! Empty sections are left out of the wire form entirely: no `components`
//! key for zero rows, no `flags` key when no flag is set.

pub mod component;
pub mod flags;

pub use self::{
    component::{ActionRow, ButtonStyle, Component, ComponentType},
    flags::MessageFlags,
};

use serde::Serialize;
use serde_json::Value;
use serde_repr::Serialize_repr;

use crate::types::util::serialize_bits;

/// An interaction response sent back to Discord.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    /// Acknowledge a PING.
    pub const fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::Pong,
            data: None,
        }
    }

    /// Defer the reply, showing a loading state until a follow-up arrives.
    pub fn deferred(flags: MessageFlags) -> Self {
        Self {
            kind: InteractionCallbackType::DeferredChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                flags,
                ..Default::default()
            }),
        }
    }

    /// The wire form of this response.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The type of callback for an interaction response.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

/// Data payload for an interaction callback.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(serialize_with = "serialize_bits", skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}
