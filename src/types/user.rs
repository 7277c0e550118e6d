//! Users.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::types::id::{marker::UserMarker, Id};
use crate::types::util::{deserialize_optional_bits, serialize_optional_bits};

/// A Discord user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub username: String,
    /// Legacy four-digit tag, `"0"` for users on the new username system.
    pub discriminator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bits",
        serialize_with = "serialize_optional_bits",
        skip_serializing_if = "Option::is_none"
    )]
    pub flags: Option<UserFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<PremiumType>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bits",
        serialize_with = "serialize_optional_bits",
        skip_serializing_if = "Option::is_none"
    )]
    pub public_flags: Option<UserFlags>,
}

impl User {
    /// `username#discriminator`, or just the username on the new username
    /// system.
    pub fn tag(&self) -> String {
        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    /// CDN URL of the user's avatar, if one is set.
    pub fn avatar_url(&self) -> Option<String> {
        let hash = self.avatar.as_ref()?;
        Some(format!(
            "https://cdn.discordapp.com/avatars/{}/{}.png",
            self.id, hash
        ))
    }
}

bitflags! {
    /// Badges and account properties of a [`User`].
    ///
    /// Bits Discord adds later are kept, not dropped.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct UserFlags: u64 {
        const STAFF = 1 << 0;
        const PARTNER = 1 << 1;
        const HYPESQUAD = 1 << 2;
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        const HYPESQUAD_ONLINE_HOUSE_1 = 1 << 6;
        const HYPESQUAD_ONLINE_HOUSE_2 = 1 << 7;
        const HYPESQUAD_ONLINE_HOUSE_3 = 1 << 8;
        const PREMIUM_EARLY_SUPPORTER = 1 << 9;
        const TEAM_PSEUDO_USER = 1 << 10;
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        const VERIFIED_BOT = 1 << 16;
        const VERIFIED_DEVELOPER = 1 << 17;
        const CERTIFIED_MODERATOR = 1 << 18;
        const BOT_HTTP_INTERACTIONS = 1 << 19;
    }
}

/// Nitro subscription tier of a [`User`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "u16", into = "u16")]
pub enum PremiumType {
    None,
    NitroClassic,
    Nitro,
    NitroBasic,
    Unknown(u16),
}

impl From<u16> for PremiumType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::None,
            1 => Self::NitroClassic,
            2 => Self::Nitro,
            3 => Self::NitroBasic,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<PremiumType> for u16 {
    fn from(value: PremiumType) -> Self {
        match value {
            PremiumType::None => 0,
            PremiumType::NitroClassic => 1,
            PremiumType::Nitro => 2,
            PremiumType::NitroBasic => 3,
            PremiumType::Unknown(unknown) => unknown,
        }
    }
}
