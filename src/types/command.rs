//! Command definitions, as registered with Discord.

use serde::{Deserialize, Serialize};

use crate::types::id::{
    marker::{ApplicationMarker, CommandMarker, GenericMarker, GuildMarker},
    Id,
};
use crate::types::interaction::{CommandOptionType, CommandType};

/// A command as sent to the bulk-overwrite endpoints.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ApplicationCommand {
    pub name: String,
    /// Empty for context-menu commands.
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

/// An argument of an [`ApplicationCommand`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A command as Discord echoes it back after registration.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct RegisteredCommand {
    pub id: Id<CommandMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    /// Bumped by Discord on every substantive update.
    pub version: Id<GenericMarker>,
}
