//! Discord interaction types.
//!
//! The shapes follow the Discord API documentation, trimmed to what an
//! interactions endpoint receives and sends. Incoming entities implement
//! `Deserialize` and are decoded through [`crate::decode`]; every type also
//! implements `Serialize`, producing the same wire form it was decoded from.
//!
//! Snowflakes stay decimal text ([`id::Id`]), permission sets stay decimal
//! text ([`guild::Permissions`]), and enumerations keep codes they don't
//! recognise in an `Unknown(u16)` variant.

// ===========================================================================
// Sub-modules
// ===========================================================================

/// Builders for responses and command definitions.
pub mod builders;

/// Channels resolved inside interactions.
pub mod channel;

/// Command definitions for registration.
pub mod command;

/// Guild members, roles, and permissions.
pub mod guild;

/// Type-safe IDs with marker types.
pub mod id;

/// Incoming interactions and their data.
pub mod interaction;

/// Outgoing responses, components, and message flags.
pub mod response;

/// Users.
pub mod user;

/// Timestamps and serde helpers.
pub mod util;

// ===========================================================================
// Re-exports
// ===========================================================================

// ---------------------------------------------------------------------------
// Incoming
// ---------------------------------------------------------------------------

pub use channel::{Channel, ChannelType, ThreadMetadata};
pub use guild::{Member, Permissions, Role, RoleTags};
pub use interaction::{
    CommandData, CommandDataOption, CommandOptionType, CommandOptionValue, CommandType,
    Interaction, InteractionData, InteractionType, MessageComponentData, ModalData, ResolvedData,
};
pub use user::{PremiumType, User, UserFlags};

// ---------------------------------------------------------------------------
// Outgoing
// ---------------------------------------------------------------------------

pub use builders::{ApplicationCommandBuilder, ResponseBuilder};
pub use command::{ApplicationCommand, CommandOption, RegisteredCommand};
pub use response::{
    ActionRow, ButtonStyle, Component, ComponentType, InteractionCallbackData,
    InteractionCallbackType, InteractionResponse, MessageFlags,
};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

pub use id::Id;
pub use util::Timestamp;
