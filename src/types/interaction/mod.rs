//! Incoming interactions, the root of every webhook payload.

pub mod application_command;
pub mod message_component;
pub mod modal;
pub mod resolved;

pub use self::{
    application_command::{
        CommandData, CommandDataOption, CommandOptionType, CommandOptionValue, CommandType,
    },
    message_component::MessageComponentData,
    modal::{ModalActionRow, ModalComponent, ModalData},
    resolved::ResolvedData,
};

use serde::{de::Error as DeError, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::{
    guild::Member,
    id::{
        marker::{
            ApplicationMarker, ChannelMarker, CommandMarker, GenericMarker, GuildMarker,
            InteractionMarker,
        },
        Id,
    },
    response::component::ComponentType,
    user::User,
};

/// A user action Discord delivered to the interactions endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interaction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(skip_serializing_if = "InteractionData::is_opaque")]
    pub data: Option<InteractionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    /// Invoking member, in guilds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Invoking user, in DMs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Continuation token for follow-up messages.
    pub token: String,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
}

impl Interaction {
    /// The user who triggered the interaction, in a guild or a DM.
    pub fn author(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    /// Command data, for command and autocomplete interactions.
    pub fn command(&self) -> Option<&CommandData> {
        match self.data.as_ref()? {
            InteractionData::ApplicationCommand(data) => Some(&**data),
            _ => None,
        }
    }

    pub fn is_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}

/// Wire shape of an [`Interaction`], before `data` is narrowed by `type`.
#[derive(Deserialize)]
struct RawInteraction {
    id: Id<InteractionMarker>,
    application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    kind: InteractionType,
    data: Option<RawData>,
    guild_id: Option<Id<GuildMarker>>,
    channel_id: Option<Id<ChannelMarker>>,
    member: Option<Member>,
    user: Option<User>,
    token: String,
    version: u8,
    locale: Option<String>,
    guild_locale: Option<String>,
}

/// Every field any kind of interaction data carries.
///
/// Decoding into the union first keeps `data` independent of where `type`
/// sits in the object.
#[derive(Deserialize)]
struct RawData {
    id: Option<Id<CommandMarker>>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<CommandType>,
    resolved: Option<ResolvedData>,
    #[serde(default, deserialize_with = "application_command::deserialize_options")]
    options: Option<Vec<CommandDataOption>>,
    guild_id: Option<Id<GuildMarker>>,
    target_id: Option<Id<GenericMarker>>,
    custom_id: Option<String>,
    component_type: Option<ComponentType>,
    values: Option<Vec<String>>,
    components: Option<Vec<ModalActionRow>>,
}

/// A field `data` needs for its interaction type but doesn't have.
#[derive(Debug, thiserror::Error)]
#[error("{kind} interaction data is missing field `{field}`")]
struct MissingDataField {
    kind: InteractionType,
    field: &'static str,
}

impl RawData {
    fn narrow(self, kind: InteractionType) -> Result<InteractionData, MissingDataField> {
        let missing = |field| MissingDataField { kind, field };

        Ok(match kind {
            InteractionType::ApplicationCommand | InteractionType::ApplicationCommandAutocomplete => {
                InteractionData::ApplicationCommand(Box::new(CommandData {
                    id: self.id.ok_or_else(|| missing("id"))?,
                    name: self.name.ok_or_else(|| missing("name"))?,
                    kind: self.kind.ok_or_else(|| missing("type"))?,
                    resolved: self.resolved,
                    options: self.options,
                    guild_id: self.guild_id,
                    target_id: self.target_id,
                }))
            }
            InteractionType::MessageComponent => {
                InteractionData::MessageComponent(MessageComponentData {
                    custom_id: self.custom_id.ok_or_else(|| missing("custom_id"))?,
                    component_type: self
                        .component_type
                        .ok_or_else(|| missing("component_type"))?,
                    values: self.values,
                })
            }
            InteractionType::ModalSubmit => InteractionData::ModalSubmit(ModalData {
                custom_id: self.custom_id.ok_or_else(|| missing("custom_id"))?,
                components: self.components.ok_or_else(|| missing("components"))?,
            }),
            InteractionType::Ping | InteractionType::Unknown(_) => InteractionData::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawInteraction::deserialize(deserializer)?;
        let data = raw
            .data
            .map(|data| data.narrow(raw.kind))
            .transpose()
            .map_err(DeError::custom)?;

        Ok(Self {
            id: raw.id,
            application_id: raw.application_id,
            kind: raw.kind,
            data,
            guild_id: raw.guild_id,
            channel_id: raw.channel_id,
            member: raw.member,
            user: raw.user,
            token: raw.token,
            version: raw.version,
            locale: raw.locale,
            guild_locale: raw.guild_locale,
        })
    }
}

/// Type of an [`Interaction`].
///
/// Codes this crate doesn't know are kept in [`InteractionType::Unknown`];
/// only codes past `u16::MAX` fail to decode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    /// A type code this crate doesn't know yet.
    Unknown(u16),
}

impl InteractionType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ping => "Ping",
            Self::ApplicationCommand => "ApplicationCommand",
            Self::MessageComponent => "MessageComponent",
            Self::ApplicationCommandAutocomplete => "ApplicationCommandAutocomplete",
            Self::ModalSubmit => "ModalSubmit",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl Display for InteractionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name(), u16::from(*self))
    }
}

impl From<u16> for InteractionType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InteractionType> for u16 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(unknown) => unknown,
        }
    }
}

/// Payload of an [`Interaction`], shaped by its [`InteractionType`].
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionData {
    /// Slash, user and message commands, and their autocomplete requests.
    ApplicationCommand(Box<CommandData>),
    MessageComponent(MessageComponentData),
    ModalSubmit(ModalData),
    /// Data of an interaction type this crate doesn't model. Its fields are
    /// not kept.
    Unknown,
}

impl InteractionData {
    /// Whether `data` has nothing to put on the wire.
    fn is_opaque(data: &Option<Self>) -> bool {
        matches!(data, None | Some(Self::Unknown))
    }
}

impl Serialize for InteractionData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ApplicationCommand(data) => data.serialize(serializer),
            Self::MessageComponent(data) => data.serialize(serializer),
            Self::ModalSubmit(data) => data.serialize(serializer),
            Self::Unknown => serializer.serialize_map(Some(0))?.end(),
        }
    }
}
