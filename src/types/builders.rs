//! Builder patterns for ergonomic type construction.
//!
//! Responses and command definitions are plain structs, but filling them in
//! field by field gets noisy once flags and rows are involved. The builders
//! here accumulate the pieces and hand back the finished value.

use crate::types::{
    command::{ApplicationCommand, CommandOption},
    interaction::{CommandOptionType, CommandType},
    response::{
        ActionRow, InteractionCallbackData, InteractionCallbackType, InteractionResponse,
        MessageFlags,
    },
};

// ===========================================================================
// Response builder
// ===========================================================================

/// Ergonomic builder for [`InteractionResponse`].
///
/// Flags are switched on by name and OR-ed together; a response built with
/// no flags serializes without a `flags` key.
///
/// ```
/// use minsky::types::{builders::ResponseBuilder, response::ActionRow};
///
/// let response = ResponseBuilder::message()
///     .content("Please verify your Reddit account.")
///     .ephemeral(true)
///     .row(ActionRow::new().link("Verify", "https://www.reddit.com/"))
///     .build();
///
/// let wire = response.to_json().unwrap();
/// assert_eq!(wire["data"]["flags"], 64);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    kind: InteractionCallbackType,
    data: InteractionCallbackData,
}

impl ResponseBuilder {
    /// Start a response of the given callback type.
    pub fn new(kind: InteractionCallbackType) -> Self {
        Self {
            kind,
            data: InteractionCallbackData::default(),
        }
    }

    /// Start a CHANNEL_MESSAGE_WITH_SOURCE response.
    pub fn message() -> Self {
        Self::new(InteractionCallbackType::ChannelMessageWithSource)
    }

    /// Start an UPDATE_MESSAGE response, editing the component's message.
    pub fn update() -> Self {
        Self::new(InteractionCallbackType::UpdateMessage)
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.data.content = Some(content.into());
        self
    }

    /// Set or clear an arbitrary flag.
    pub fn flag(mut self, flag: MessageFlags, enabled: bool) -> Self {
        self.data.flags.set(flag, enabled);
        self
    }

    /// Only the invoking user sees the message.
    pub fn ephemeral(self, enabled: bool) -> Self {
        self.flag(MessageFlags::EPHEMERAL, enabled)
    }

    pub fn loading(self, enabled: bool) -> Self {
        self.flag(MessageFlags::LOADING, enabled)
    }

    pub fn suppress_embeds(self, enabled: bool) -> Self {
        self.flag(MessageFlags::SUPPRESS_EMBEDS, enabled)
    }

    /// Append an action row.
    pub fn row(mut self, row: ActionRow) -> Self {
        self.data.components.push(row);
        self
    }

    /// Consume the builder and return the finished [`InteractionResponse`].
    pub fn build(self) -> InteractionResponse {
        InteractionResponse {
            kind: self.kind,
            data: Some(self.data),
        }
    }
}

// ===========================================================================
// ApplicationCommand builder
// ===========================================================================

/// Ergonomic builder for [`ApplicationCommand`].
///
/// ```
/// use minsky::types::builders::ApplicationCommandBuilder;
///
/// let cmd = ApplicationCommandBuilder::chat_input("verify", "Verify your Reddit account").build();
/// assert_eq!(cmd.name, "verify");
/// ```
pub struct ApplicationCommandBuilder {
    inner: ApplicationCommand,
}

impl ApplicationCommandBuilder {
    fn new(kind: CommandType, name: String, description: String) -> Self {
        Self {
            inner: ApplicationCommand {
                name,
                description,
                kind,
                options: Vec::new(),
            },
        }
    }

    /// Start building a CHAT_INPUT (slash) command.
    pub fn chat_input(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(CommandType::ChatInput, name.into(), description.into())
    }

    /// Start building a USER context-menu command.
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(CommandType::User, name.into(), String::new())
    }

    /// Start building a MESSAGE context-menu command.
    pub fn message(name: impl Into<String>) -> Self {
        Self::new(CommandType::Message, name.into(), String::new())
    }

    /// Add a simple option with just a name, description, type, and required flag.
    pub fn simple_option(
        mut self,
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.inner.options.push(CommandOption {
            kind,
            name: name.into(),
            description: description.into(),
            required: Some(required),
        });
        self
    }

    /// Consume the builder and return the finished [`ApplicationCommand`].
    pub fn build(self) -> ApplicationCommand {
        self.inner
    }
}

// ===========================================================================
// Tests
// ===========================================================================
