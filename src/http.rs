//! HTTP client for the Discord REST API.
//!
//! Only command registration goes over REST; interactions themselves are
//! answered in the webhook response. All calls funnel through
//! [`DiscordHttpClient::request`] so auth headers, 429 back-off, and error
//! handling live in one place.

use std::time::Duration;

use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::decode;
use crate::types::{ApplicationCommand, RegisteredCommand};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/minsky, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);
const MAX_RETRIES: u32 = 3;
const MAX_BACKOFF: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Non-success status from Discord.
    #[error("Discord API error {status} on {route}: {body}")]
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Transport / network error.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Serialisation error.
    #[error("Serialisation error: {0}")]
    Serde(String),
}

// ---------------------------------------------------------------------------
// DiscordHttpClient
// ---------------------------------------------------------------------------

/// A thin HTTP client for the Discord REST API.
///
/// Cheap to clone (the connection pool is shared).
#[derive(Clone)]
pub struct DiscordHttpClient {
    token: String,
    client: reqwest::Client,
}

impl DiscordHttpClient {
    /// Create a new client with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Send a request to `{BASE_URL}/{path}`.
    ///
    /// `route_key` names the route in logs and errors. It should be a
    /// template like `PUT /applications/{application_id}/commands`.
    ///
    /// Returns the raw response body on success. A 429 is retried after the
    /// delay Discord asks for, a few times at most.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        route_key: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, HttpError> {
        let url = format!("{}/{}", BASE_URL, path.trim_start_matches('/'));

        for attempt in 0..=MAX_RETRIES {
            let mut req = self
                .client
                .request(method.clone(), &url)
                .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
                .header(reqwest::header::USER_AGENT, USER_AGENT);
            if let Some(json) = body {
                req = req.json(json);
            }

            let resp = req.send().await?;
            let status = resp.status();

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < MAX_RETRIES {
                let delay = retry_after(resp.headers());
                warn!(
                    route = route_key,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "rate-limited by Discord, backing off"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let bytes = resp.bytes().await?;
            debug!(route = route_key, status = status.as_u16(), "Discord API response");

            if status.is_success() {
                return Ok(bytes.to_vec());
            }

            return Err(HttpError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
                route: route_key.to_string(),
            });
        }

        Err(HttpError::Api {
            status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
            body: "rate-limited after max retries".to_string(),
            route: route_key.to_string(),
        })
    }

    /// Like [`request`](Self::request) but decodes the response body.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        route_key: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, HttpError> {
        let bytes = self.request(method, path, route_key, body).await?;
        decode::from_slice(&bytes).map_err(|e| HttpError::Serde(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Slash command registration
    // ------------------------------------------------------------------

    /// Register (or overwrite) guild-scoped application commands.
    ///
    /// Guild commands update instantly, which makes them the choice while
    /// developing.
    pub async fn bulk_overwrite_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[ApplicationCommand],
    ) -> Result<Vec<RegisteredCommand>, HttpError> {
        let path = commands_path(application_id, Some(guild_id));
        let route_key = format!("PUT /{path}");
        let body = serde_json::to_value(commands).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request_json(Method::PUT, &path, &route_key, Some(&body))
            .await
    }

    /// Register (or overwrite) global application commands.
    pub async fn bulk_overwrite_global_commands(
        &self,
        application_id: &str,
        commands: &[ApplicationCommand],
    ) -> Result<Vec<RegisteredCommand>, HttpError> {
        let path = commands_path(application_id, None);
        let route_key = format!("PUT /{path}");
        let body = serde_json::to_value(commands).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request_json(Method::PUT, &path, &route_key, Some(&body))
            .await
    }
}

impl std::fmt::Debug for DiscordHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordHttpClient")
            .field("token", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn commands_path(application_id: &str, guild_id: Option<&str>) -> String {
    match guild_id {
        Some(guild_id) => format!("applications/{application_id}/guilds/{guild_id}/commands"),
        None => format!("applications/{application_id}/commands"),
    }
}

/// Delay requested by a 429 response, capped at [`MAX_BACKOFF`].
fn retry_after(headers: &HeaderMap) -> Duration {
    ["x-ratelimit-reset-after", "retry-after"]
        .iter()
        .find_map(|name| headers.get(*name)?.to_str().ok()?.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(Duration::from_secs(1))
        .min(MAX_BACKOFF)
}
