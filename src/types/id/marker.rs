//! Markers for the resource types an [`Id`] can point at.
//!
//! Markers perform no logical action. They only make sure a role's ID can't
//! be passed where a user's ID is expected: an `Id<RoleMarker>` and an
//! `Id<UserMarker>` are different types even though both are decimal text on
//! the wire.
//!
//! [`Id`]: super::Id

/// Marker for application IDs.
///
/// [`Interaction::application_id`] uses this ID marker.
///
/// [`Interaction::application_id`]: crate::types::interaction::Interaction::application_id
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for channel IDs.
///
/// Types such as [`Channel`] or [`Interaction`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`Interaction`]: crate::types::interaction::Interaction
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for command IDs.
///
/// [`CommandData`] uses this ID marker.
///
/// [`CommandData`]: crate::types::interaction::CommandData
#[derive(Debug)]
#[non_exhaustive]
pub struct CommandMarker;

/// Marker for IDs whose resource type depends on context.
///
/// [`CommandData::target_id`] is a user ID for USER commands and a message
/// ID for MESSAGE commands.
///
/// [`CommandData::target_id`]: crate::types::interaction::CommandData::target_id
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for integration IDs.
///
/// [`RoleTags`] uses this ID marker.
///
/// [`RoleTags`]: crate::types::guild::RoleTags
#[derive(Debug)]
#[non_exhaustive]
pub struct IntegrationMarker;

/// Marker for interaction IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for role IDs.
///
/// Types such as [`Member`] or [`Role`] use this ID marker.
///
/// [`Member`]: crate::types::guild::Member
/// [`Role`]: crate::types::guild::Role
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for user IDs.
///
/// Types such as [`User`] or [`RoleTags`] use this ID marker.
///
/// [`User`]: crate::types::user::User
/// [`RoleTags`]: crate::types::guild::RoleTags
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
