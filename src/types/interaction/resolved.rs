use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{
    channel::Channel,
    guild::{Member, Role},
    id::{
        marker::{ChannelMarker, RoleMarker, UserMarker},
        Id,
    },
    user::User,
};

/// Entities Discord resolves for a command's arguments.
///
/// Each map is keyed by the entity's snowflake. `members` is keyed by user
/// ID and its values are partial: the matching [`User`] lives in `users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<HashMap<Id<UserMarker>, User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<HashMap<Id<UserMarker>, Member>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<HashMap<Id<RoleMarker>, Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<HashMap<Id<ChannelMarker>, Channel>>,
}

impl ResolvedData {
    pub fn user(&self, id: &Id<UserMarker>) -> Option<&User> {
        self.users.as_ref()?.get(id)
    }

    pub fn member(&self, id: &Id<UserMarker>) -> Option<&Member> {
        self.members.as_ref()?.get(id)
    }

    pub fn role(&self, id: &Id<RoleMarker>) -> Option<&Role> {
        self.roles.as_ref()?.get(id)
    }

    pub fn channel(&self, id: &Id<ChannelMarker>) -> Option<&Channel> {
        self.channels.as_ref()?.get(id)
    }
}
