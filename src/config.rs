//! Process configuration, read once at start-up.
//!
//! Every value can come from a flag or from the environment (a `.env` file
//! is loaded first). The resulting [`Config`] is immutable and shared by
//! reference with the request handlers.

use std::net::SocketAddr;

use clap::Parser;

use crate::signature::{KeyError, PublicKey};
use crate::types::id::{
    marker::{ApplicationMarker, ChannelMarker, RoleMarker},
    Id, InvalidSnowflake,
};

/// Interactions endpoint for Discord applications.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "minsky", version, about)]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "MINSKY_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Hex-encoded Ed25519 public key from the developer portal.
    #[arg(long, env = "DISCORD_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Accept requests without checking their signature. Local testing only.
    #[arg(long, env = "MINSKY_INSECURE_SKIP_VERIFY")]
    pub insecure_skip_verify: bool,

    #[arg(long, env = "DISCORD_APPLICATION_ID")]
    pub application_id: Option<String>,

    /// Channel that receives verification logs.
    #[arg(long, env = "DISCORD_LOG_CHANNEL_ID")]
    pub log_channel_id: Option<String>,

    /// Role granted to verified members.
    #[arg(long, env = "DISCORD_VERIFIED_ROLE_ID")]
    pub verified_role_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DISCORD_PUBLIC_KEY is not set; pass --insecure-skip-verify to run without signature checks")]
    MissingPublicKey,
    #[error("DISCORD_PUBLIC_KEY is invalid: {0}")]
    PublicKey(#[from] KeyError),
    #[error("invalid bind address `{value}`: {source}")]
    Bind {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("{name} is not a snowflake: {source}")]
    Snowflake {
        name: &'static str,
        source: InvalidSnowflake,
    },
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    /// `None` only when verification was explicitly disabled.
    pub public_key: Option<PublicKey>,
    pub application_id: Option<Id<ApplicationMarker>>,
    pub log_channel_id: Option<Id<ChannelMarker>>,
    pub verified_role_id: Option<Id<RoleMarker>>,
}

impl Config {
    /// Load `.env`, then parse flags and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let bind = args.bind.parse().map_err(|source| ConfigError::Bind {
            value: args.bind.clone(),
            source,
        })?;

        let public_key = match args.public_key.as_deref().map(str::trim) {
            Some(hex) if !hex.is_empty() => Some(PublicKey::from_hex(hex)?),
            _ if args.insecure_skip_verify => None,
            _ => return Err(ConfigError::MissingPublicKey),
        };

        Ok(Self {
            bind,
            public_key,
            application_id: snowflake("DISCORD_APPLICATION_ID", args.application_id)?,
            log_channel_id: snowflake("DISCORD_LOG_CHANNEL_ID", args.log_channel_id)?,
            verified_role_id: snowflake("DISCORD_VERIFIED_ROLE_ID", args.verified_role_id)?,
        })
    }

    /// Whether requests skip signature verification.
    pub fn is_insecure(&self) -> bool {
        self.public_key.is_none()
    }
}

fn snowflake<T>(name: &'static str, value: Option<String>) -> Result<Option<Id<T>>, ConfigError> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| Id::parse(&value).map_err(|source| ConfigError::Snowflake { name, source }))
        .transpose()
}
