//! Registers the application's commands with Discord.
//!
//! Commands go to `DISCORD_TEST_GUILD` when it is set, where they show up
//! immediately, and globally otherwise.

use std::env;
use std::process::ExitCode;

use minsky::handlers;
use minsky::http::{DiscordHttpClient, HttpError};

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("{name} is not set"))
}

/// What to print on stderr when registration fails: a fixed headline, then
/// Discord's response body or the transport error.
fn failure_report(error: &HttpError) -> String {
    match error {
        HttpError::Api { body, .. } => format!("Error registering commands!\n{body}"),
        other => format!("Error registering commands!\n{other}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minsky=info".into()),
        )
        .init();

    let (application_id, token) =
        match required("DISCORD_APPLICATION_ID").and_then(|id| Ok((id, required("DISCORD_TOKEN")?))) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };
    let guild_id = env::var("DISCORD_TEST_GUILD")
        .ok()
        .filter(|value| !value.trim().is_empty());

    let client = DiscordHttpClient::new(token);
    let commands = handlers::commands();

    let result = match guild_id.as_deref() {
        Some(guild_id) => {
            client
                .bulk_overwrite_guild_commands(&application_id, guild_id, &commands)
                .await
        }
        None => {
            client
                .bulk_overwrite_global_commands(&application_id, &commands)
                .await
        }
    };

    match result {
        Ok(registered) => {
            for command in &registered {
                tracing::info!(id = %command.id, name = %command.name, "registered");
            }
            println!("Registered commands!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure_report(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_failure_prints_headline_then_body() {
        let err = HttpError::Api {
            status: 401,
            body: r#"{"message": "401: Unauthorized", "code": 0}"#.into(),
            route: "PUT /applications/1/commands".into(),
        };
        assert_eq!(
            failure_report(&err),
            "Error registering commands!\n{\"message\": \"401: Unauthorized\", \"code\": 0}"
        );
    }

    #[test]
    fn other_failures_keep_the_headline() {
        let err = HttpError::Serde("expected value".into());
        assert!(failure_report(&err).starts_with("Error registering commands!\n"));
    }
}
