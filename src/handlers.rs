//! The application's commands.
//!
//! [`commands`] is what gets registered with Discord; [`router`] answers the
//! interactions those commands produce. The two must stay in step: every
//! registered command needs a handler, or invoking it yields a 400.

use tracing::info;

use crate::router::Router;
use crate::types::*;

/// Where the verify button sends users.
pub const VERIFY_URL: &str = "https://www.reddit.com/";

/// A handler that could not produce a response.
///
/// The message is for logs only; clients see a generic server error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Slash command definitions
// ---------------------------------------------------------------------------

/// Returns the list of slash commands to register with Discord.
pub fn commands() -> Vec<ApplicationCommand> {
    vec![ApplicationCommandBuilder::chat_input("verify", "Verify your Reddit account").build()]
}

/// The router answering every command in [`commands`].
pub fn router() -> Router {
    Router::new().command("verify", verify)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// `/verify`: point the user at the account-linking flow.
///
/// The reply is ephemeral so only the invoking user sees the link.
pub fn verify(interaction: &Interaction) -> Result<InteractionResponse, HandlerError> {
    info!(
        interaction_id = %interaction.id,
        user = interaction.author().map(User::tag).as_deref().unwrap_or("unknown"),
        guild_id = ?interaction.guild_id.as_ref().map(Id::as_str),
        "verification requested"
    );

    Ok(ResponseBuilder::message()
        .content("Please verify your Reddit account.")
        .ephemeral(true)
        .row(ActionRow::new().link("Verify", VERIFY_URL))
        .build())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
