//! Routing decoded interactions to handlers.
//!
//! A [`Router`] keys command and autocomplete handlers by command name, and
//! everything else by [`InteractionType`]. Pings never reach a handler.
//! Registering a new handler never touches the existing ones.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::handlers::HandlerError;
use crate::types::{Interaction, InteractionResponse, InteractionType};

/// Something that answers an interaction.
///
/// Handlers are synchronous: they only look at the interaction and build a
/// response. Any closure of the right shape is a handler.
pub trait Handler: Send + Sync {
    fn handle(&self, interaction: &Interaction) -> Result<InteractionResponse, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Interaction) -> Result<InteractionResponse, HandlerError> + Send + Sync,
{
    fn handle(&self, interaction: &Interaction) -> Result<InteractionResponse, HandlerError> {
        self(interaction)
    }
}

/// Why an interaction could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("no handler for interaction type {0}")]
    UnsupportedType(InteractionType),
    #[error("no handler for command `{0}`")]
    UnsupportedCommand(String),
    #[error("command interaction carries no command data")]
    MissingData,
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl RouterError {
    /// Whether the interaction itself was at fault, as opposed to a handler.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Handler(_))
    }
}

/// Registry of interaction handlers.
#[derive(Default)]
pub struct Router {
    commands: HashMap<String, Box<dyn Handler>>,
    autocomplete: HashMap<String, Box<dyn Handler>>,
    types: HashMap<InteractionType, Box<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle APPLICATION_COMMAND interactions for the command `name`.
    pub fn command(mut self, name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.commands.insert(name.into(), Box::new(handler));
        self
    }

    /// Handle autocomplete requests for the command `name`.
    ///
    /// Autocomplete requests for commands without one go to the handler
    /// registered for [`InteractionType::ApplicationCommandAutocomplete`].
    pub fn autocomplete(mut self, name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.autocomplete.insert(name.into(), Box::new(handler));
        self
    }

    /// Handle every interaction of type `kind` not claimed by a more
    /// specific registration.
    ///
    /// Handlers for [`InteractionType::Ping`] are never called and command
    /// interactions only route by name.
    pub fn on_type(mut self, kind: InteractionType, handler: impl Handler + 'static) -> Self {
        self.types.insert(kind, Box::new(handler));
        self
    }

    /// Names of the registered commands.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Produce the response to `interaction`.
    pub fn dispatch(&self, interaction: &Interaction) -> Result<InteractionResponse, RouterError> {
        let handler = match interaction.kind {
            InteractionType::Ping => return Ok(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => {
                let name = &interaction.command().ok_or(RouterError::MissingData)?.name;
                debug!(interaction_id = %interaction.id, command = %name, "dispatching command");

                self.commands
                    .get(name)
                    .ok_or_else(|| RouterError::UnsupportedCommand(name.clone()))?
            }
            InteractionType::ApplicationCommandAutocomplete => {
                let name = &interaction.command().ok_or(RouterError::MissingData)?.name;

                self.autocomplete
                    .get(name)
                    .or_else(|| self.types.get(&interaction.kind))
                    .ok_or(RouterError::UnsupportedType(interaction.kind))?
            }
            kind => self
                .types
                .get(&kind)
                .ok_or(RouterError::UnsupportedType(kind))?,
        };

        Ok(handler.handle(interaction)?)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("autocomplete", &self.autocomplete.keys().collect::<Vec<_>>())
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
