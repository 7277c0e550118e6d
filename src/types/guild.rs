//! Guild members and roles.

use serde::{
    de::{Error as DeError, IgnoredAny, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt::{Formatter, Result as FmtResult};

use crate::types::id::{
    marker::{IntegrationMarker, RoleMarker, UserMarker},
    Id,
};
use crate::types::user::User;
use crate::types::util::Timestamp;

/// A user's membership in a guild.
///
/// Members inside [`ResolvedData`] are partial: they carry no `user` (it is
/// in the sibling `users` map) and no `deaf`/`mute`, which is why those are
/// optional here.
///
/// [`ResolvedData`]: crate::types::interaction::ResolvedData
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub roles: Vec<Id<RoleMarker>>,
    pub joined_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    /// Total permissions of the member in the interaction's channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    /// When the member's timeout expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_disabled_until: Option<Timestamp>,
}

impl Member {
    /// Whether the member holds `role`.
    pub fn has_role(&self, role: &Id<RoleMarker>) -> bool {
        self.roles.contains(role)
    }
}

/// A permission bitset, kept as the decimal text Discord sends.
///
/// The set has outgrown the 53 bits a JSON number can carry safely, so it is
/// never converted to a numeric type here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Permissions(String);

impl Permissions {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a decimal permission string")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DeError::invalid_value(Unexpected::Str(v), &self));
                }

                Ok(Permissions(v.to_owned()))
            }
        }

        deserializer.deserialize_str(PermissionsVisitor)
    }
}

/// A guild role.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Role {
    pub id: Id<RoleMarker>,
    pub name: String,
    /// RGB color, `0` for none.
    pub color: u32,
    pub hoist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
    pub position: i64,
    pub permissions: Permissions,
    pub managed: bool,
    pub mentionable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
}

/// What a managed role is attached to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoleTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<Id<UserMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<Id<IntegrationMarker>>,
    /// Whether this is the guild's booster role.
    ///
    /// Discord signals this by the key's presence with a `null` value.
    #[serde(
        default,
        deserialize_with = "deserialize_presence",
        serialize_with = "serialize_presence",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub premium_subscriber: bool,
}

fn deserialize_presence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer).map(|_| true)
}

fn serialize_presence<S: Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_unit()
}

#[cfg(test)]
mod tests {
    use super::{Member, Role, RoleTags};
    use crate::decode;
    use serde_json::json;

    #[test]
    fn partial_member_from_resolved_data() {
        let value = json!({
            "avatar": null,
            "communication_disabled_until": null,
            "joined_at": "2021-06-02T17:39:59.617000+00:00",
            "nick": null,
            "pending": false,
            "permissions": "2199023255551",
            "premium_since": null,
            "roles": ["851157413412749342"],
        });

        let member: Member = decode::from_value(&value).unwrap();
        assert!(member.user.is_none());
        assert!(member.deaf.is_none());
        assert_eq!(member.pending, Some(false));
        assert_eq!(member.permissions.unwrap().as_str(), "2199023255551");
        assert_eq!(member.joined_at.as_secs(), 1_622_655_599);
        assert!(member
            .roles
            .iter()
            .any(|role| role.as_str() == "851157413412749342"));
    }

    #[test]
    fn member_timeout_timestamp_must_parse() {
        let value = json!({
            "roles": [],
            "joined_at": "2021-06-02T17:39:59+00:00",
            "communication_disabled_until": "next tuesday",
        });

        let err = decode::from_value::<Member>(&value).unwrap_err();
        assert_eq!(err.path.to_string(), "communication_disabled_until");
        assert_eq!(err.kind.message(), "provided value is not in an iso 8601 format");
    }

    #[test]
    fn role_permissions_exceed_f64_precision() {
        let value = json!({
            "id": "41771983423143936",
            "name": "WE DEM BOYZZ!!!!!!",
            "color": 3447003,
            "hoist": true,
            "position": 1,
            "permissions": "18446744073709551615",
            "managed": false,
            "mentionable": false,
        });

        let role: Role = decode::from_value(&value).unwrap();
        assert_eq!(role.permissions.as_str(), "18446744073709551615");
        assert_eq!(role.color, 0x3498DB);
        assert!(role.tags.is_none());
        assert_eq!(serde_json::to_value(&role).unwrap(), value);
    }

    #[test]
    fn premium_subscriber_is_signalled_by_presence() {
        let booster: RoleTags =
            decode::from_value(&json!({"premium_subscriber": null})).unwrap();
        assert!(booster.premium_subscriber);

        let bot: RoleTags = decode::from_value(&json!({"bot_id": "1"})).unwrap();
        assert!(!bot.premium_subscriber);

        assert_eq!(
            serde_json::to_value(&booster).unwrap(),
            json!({"premium_subscriber": null})
        );
        assert_eq!(serde_json::to_value(&bot).unwrap(), json!({"bot_id": "1"}));
    }

    #[test]
    fn permissions_must_be_decimal_text() {
        let err = decode::from_value::<super::Permissions>(&json!("0x10")).unwrap_err();
        assert_eq!(
            err.kind.message(),
            "invalid value: string \"0x10\", expected a decimal permission string"
        );

        let err = decode::from_value::<super::Permissions>(&json!(16)).unwrap_err();
        assert!(err.kind.message().starts_with("invalid type: integer `16`"));
    }
}
