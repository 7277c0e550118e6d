//! Data of APPLICATION_COMMAND and APPLICATION_COMMAND_AUTOCOMPLETE
//! interactions.

use serde::{
    de::{DeserializeSeed, Deserializer, Error as DeError, IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserialize, Serialize, Serializer,
};
use serde_json::Value;
use std::fmt::{Formatter, Result as FmtResult};

use crate::decode::MAX_OPTION_DEPTH;
use crate::types::id::{
    marker::{CommandMarker, GenericMarker, GuildMarker},
    Id,
};

use super::resolved::ResolvedData;

/// The command that was invoked.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CommandData {
    pub id: Id<CommandMarker>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedData>,
    #[serde(
        default,
        deserialize_with = "deserialize_options",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Vec<CommandDataOption>>,
    /// Guild the command is registered to, if it is guild-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    /// User or message targeted by a context-menu command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Id<GenericMarker>>,
}

impl CommandData {
    /// Top-level option named `name`.
    pub fn option(&self, name: &str) -> Option<&CommandDataOption> {
        self.options.as_deref()?.iter().find(|o| o.name == name)
    }

    /// The option the user is typing into, for autocomplete.
    pub fn focused(&self) -> Option<&CommandDataOption> {
        fn search(options: &[CommandDataOption]) -> Option<&CommandDataOption> {
            options.iter().find_map(|option| {
                if option.focused == Some(true) {
                    Some(option)
                } else {
                    search(option.options.as_deref().unwrap_or_default())
                }
            })
        }

        search(self.options.as_deref()?)
    }
}

/// One node of a command's argument tree.
///
/// Subcommands and subcommand groups carry nested `options`; leaf
/// arguments carry a `value`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommandDataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CommandOptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandDataOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

/// Top-level `options` of a command.
pub(crate) fn deserialize_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<CommandDataOption>>, D::Error> {
    OptionList { depth: 1 }.deserialize(deserializer)
}

/// An optional option list sitting `depth` levels below the command.
#[derive(Clone, Copy)]
struct OptionList {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for OptionList {
    type Value = Option<Vec<CommandDataOption>>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de> Visitor<'de> for OptionList {
    type Value = Option<Vec<CommandDataOption>>;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a list of command options")
    }

    fn visit_none<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        if self.depth > MAX_OPTION_DEPTH {
            return Err(DeError::custom(format_args!(
                "option tree exceeds the depth limit of {MAX_OPTION_DEPTH}"
            )));
        }

        deserializer.deserialize_seq(OptionElements { depth: self.depth }).map(Some)
    }
}

struct OptionElements {
    depth: usize,
}

impl<'de> Visitor<'de> for OptionElements {
    type Value = Vec<CommandDataOption>;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a list of command options")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut options = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(25));

        while let Some(option) = seq.next_element_seed(OptionNode { depth: self.depth })? {
            options.push(option);
        }

        Ok(options)
    }
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum OptionField {
    Name,
    #[serde(rename = "type")]
    Kind,
    Value,
    Options,
    Focused,
    #[serde(other)]
    Other,
}

/// A single option whose list sits `depth` levels below the command.
#[derive(Clone, Copy)]
struct OptionNode {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for OptionNode {
    type Value = CommandDataOption;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for OptionNode {
    type Value = CommandDataOption;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a command option")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut name: Option<String> = None;
        let mut kind: Option<CommandOptionType> = None;
        let mut value = None;
        let mut untyped: Option<Value> = None;
        let mut options = None;
        let mut focused: Option<bool> = None;

        while let Some(field) = map.next_key()? {
            match field {
                OptionField::Name => name = Some(map.next_value()?),
                OptionField::Kind => kind = Some(map.next_value()?),
                // The value's type follows `type`, which may come later.
                OptionField::Value => match kind {
                    Some(kind) => value = map.next_value_seed(OptionValue { kind, focused })?,
                    None => untyped = map.next_value()?,
                },
                OptionField::Options => {
                    options = map.next_value_seed(OptionList {
                        depth: self.depth + 1,
                    })?;
                }
                OptionField::Focused => focused = map.next_value()?,
                OptionField::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let name = name.ok_or_else(|| DeError::missing_field("name"))?;
        let kind = kind.ok_or_else(|| DeError::missing_field("type"))?;

        if let Some(raw) = untyped {
            let focused = Some(focused.unwrap_or_default());
            value = Some(CommandOptionValue::from_wire(kind, raw, focused).map_err(DeError::custom)?);
        }

        let value = match (value, focused) {
            (Some(CommandOptionValue::String(text)), Some(true)) => {
                Some(CommandOptionValue::Focused(text))
            }
            // Text taken before `focused` turned out unset.
            (Some(CommandOptionValue::Focused(text)), focused) if focused != Some(true) => Some(
                CommandOptionValue::from_wire(kind, Value::String(text), Some(false))
                    .map_err(DeError::custom)?,
            ),
            (value, _) => value,
        };

        Ok(CommandDataOption {
            name,
            kind,
            value,
            options,
            focused,
        })
    }
}

/// The `value` of an option whose type is already known.
struct OptionValue {
    kind: CommandOptionType,
    focused: Option<bool>,
}

impl<'de> DeserializeSeed<'de> for OptionValue {
    type Value = Option<CommandOptionValue>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            Some(raw) => CommandOptionValue::from_wire(self.kind, raw, self.focused)
                .map(Some)
                .map_err(DeError::custom),
            None => Ok(None),
        }
    }
}

/// Value of a leaf [`CommandDataOption`].
///
/// Snowflake-valued options (user, channel, role, mentionable, attachment)
/// stay as their decimal text in [`CommandOptionValue::String`].
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    /// Partial input of the option being autocompleted.
    Focused(String),
}

impl CommandOptionValue {
    /// Type `value` by the option's `kind`.
    ///
    /// `focused` is `None` while the flag hasn't been seen yet; text for a
    /// numeric or boolean option is then held as [`Self::Focused`] until it
    /// is.
    fn from_wire(
        kind: CommandOptionType,
        value: Value,
        focused: Option<bool>,
    ) -> Result<Self, serde_json::Error> {
        match value {
            // Autocomplete sends whatever the user has typed so far, as
            // text, regardless of the option's type.
            Value::String(text)
                if focused == Some(true) || (focused.is_none() && !kind.is_textual()) =>
            {
                Ok(Self::Focused(text))
            }
            value => Self::from_wire_typed(kind, value),
        }
    }

    fn from_wire_typed(kind: CommandOptionType, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            CommandOptionType::Integer => Self::Integer(i64::deserialize(value)?),
            CommandOptionType::Number => Self::Number(f64::deserialize(value)?),
            CommandOptionType::Boolean => Self::Boolean(bool::deserialize(value)?),
            CommandOptionType::String
            | CommandOptionType::User
            | CommandOptionType::Channel
            | CommandOptionType::Role
            | CommandOptionType::Mentionable
            | CommandOptionType::Attachment => Self::String(String::deserialize(value)?),
            // Types we don't know: take the JSON scalar at face value.
            CommandOptionType::SubCommand
            | CommandOptionType::SubCommandGroup
            | CommandOptionType::Unknown(_) => match value {
                Value::Bool(value) => Self::Boolean(value),
                Value::Number(number) => match number.as_i64() {
                    Some(value) => Self::Integer(value),
                    None => Self::Number(f64::deserialize(Value::Number(number))?),
                },
                other => Self::String(String::deserialize(other)?),
            },
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::Focused(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl Serialize for CommandOptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) | Self::Focused(value) => serializer.serialize_str(value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Boolean(value) => serializer.serialize_bool(*value),
        }
    }
}

/// Type of a registered command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum CommandType {
    /// Slash command.
    ChatInput,
    /// Context-menu command on a user.
    User,
    /// Context-menu command on a message.
    Message,
    Unknown(u16),
}

impl From<u16> for CommandType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::ChatInput,
            2 => Self::User,
            3 => Self::Message,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<CommandType> for u16 {
    fn from(value: CommandType) -> Self {
        match value {
            CommandType::ChatInput => 1,
            CommandType::User => 2,
            CommandType::Message => 3,
            CommandType::Unknown(unknown) => unknown,
        }
    }
}

/// Type of a command argument.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum CommandOptionType {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
    Unknown(u16),
}

impl CommandOptionType {
    /// Whether values of this type arrive as JSON text.
    ///
    /// Subcommands and unknown types have no fixed value type, so any
    /// scalar, text included, is taken as is.
    const fn is_textual(self) -> bool {
        !matches!(self, Self::Integer | Self::Number | Self::Boolean)
    }
}

impl From<u16> for CommandOptionType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<CommandOptionType> for u16 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::SubCommand => 1,
            CommandOptionType::SubCommandGroup => 2,
            CommandOptionType::String => 3,
            CommandOptionType::Integer => 4,
            CommandOptionType::Boolean => 5,
            CommandOptionType::User => 6,
            CommandOptionType::Channel => 7,
            CommandOptionType::Role => 8,
            CommandOptionType::Mentionable => 9,
            CommandOptionType::Number => 10,
            CommandOptionType::Attachment => 11,
            CommandOptionType::Unknown(unknown) => unknown,
        }
    }
}
