//! Channels, as resolved inside interactions.

use serde::{Deserialize, Serialize};

use crate::types::guild::Permissions;
use crate::types::id::{marker::ChannelMarker, Id};
use crate::types::util::Timestamp;

/// A partial channel object.
///
/// Interactions only ever carry the subset Discord resolves for command
/// arguments, so this is not the full channel resource.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Channel {
    pub id: Id<ChannelMarker>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Category of a guild channel, or the parent channel of a thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_metadata: Option<ThreadMetadata>,
    /// Computed permissions of the invoking user in this channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

/// Type of a [`Channel`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum ChannelType {
    GuildText,
    Private,
    GuildVoice,
    Group,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    /// A type code this crate doesn't know yet.
    Unknown(u16),
}

impl ChannelType {
    /// Whether this is one of the thread types.
    pub const fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }
}

impl From<u16> for ChannelType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Private,
            2 => Self::GuildVoice,
            3 => Self::Group,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ChannelType> for u16 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::GuildText => 0,
            ChannelType::Private => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::Group => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::AnnouncementThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::GuildDirectory => 14,
            ChannelType::GuildForum => 15,
            ChannelType::Unknown(unknown) => unknown,
        }
    }
}

/// Thread-specific fields of a [`Channel`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThreadMetadata {
    pub archived: bool,
    /// Minutes of inactivity before the thread auto-archives.
    pub auto_archive_duration: u16,
    /// When the archived state last changed.
    pub archive_timestamp: Timestamp,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitable: Option<bool>,
    /// Only set for threads created after 2022-01-09.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::{Channel, ChannelType};
    use crate::decode;
    use serde_json::json;
    use serde_test::Token;

    #[test]
    fn thread_channel() {
        let value = json!({
            "id": "41771983423143937",
            "type": 11,
            "name": "help",
            "parent_id": "41771983423143936",
            "permissions": "17179869183",
            "thread_metadata": {
                "archived": false,
                "auto_archive_duration": 1440,
                "archive_timestamp": "2021-06-02T17:39:59.617000+00:00",
                "locked": false,
                "create_timestamp": "2022-01-10T00:00:00.000000+00:00",
            },
        });

        let channel: Channel = decode::from_value(&value).unwrap();
        assert_eq!(channel.kind, ChannelType::PublicThread);
        assert!(channel.kind.is_thread());

        let metadata = channel.thread_metadata.as_ref().unwrap();
        assert_eq!(metadata.auto_archive_duration, 1440);
        assert!(metadata.invitable.is_none());
        assert!(metadata.create_timestamp.is_some());

        assert_eq!(serde_json::to_value(&channel).unwrap(), value);
    }

    #[test]
    fn thread_metadata_requires_archive_timestamp() {
        let value = json!({
            "id": "1",
            "type": 11,
            "thread_metadata": {
                "archived": true,
                "auto_archive_duration": 60,
                "locked": true,
            },
        });

        let err = decode::from_value::<Channel>(&value).unwrap_err();
        assert_eq!(err.path.to_string(), "thread_metadata");
        assert_eq!(err.kind.message(), "missing field `archive_timestamp`");
    }

    #[test]
    fn unknown_channel_type_is_preserved() {
        let channel: Channel = decode::from_value(&json!({"id": "1", "type": 16})).unwrap();
        assert_eq!(channel.kind, ChannelType::Unknown(16));
        serde_test::assert_tokens(&channel.kind, &[Token::U16(16)]);
    }

    #[test]
    fn codes_past_a_byte_are_preserved() {
        let channel: Channel = decode::from_value(&json!({"id": "1", "type": 300})).unwrap();
        assert_eq!(channel.kind, ChannelType::Unknown(300));
        assert_eq!(serde_json::to_value(&channel).unwrap()["type"], 300);
    }

    #[test]
    fn codes_past_u16_are_rejected() {
        let err = decode::from_value::<Channel>(&json!({"id": "1", "type": 70000})).unwrap_err();
        assert_eq!(err.path.to_string(), "type");
        assert!(err.kind.message().contains("70000"), "{err}");
    }

    #[test]
    fn channel_type_must_be_an_integer() {
        let err = decode::from_value::<Channel>(&json!({"id": "1", "type": "text"})).unwrap_err();
        assert_eq!(err.path.to_string(), "type");
        assert!(err.kind.message().starts_with("invalid type: string"));
    }
}
