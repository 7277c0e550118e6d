//! The HTTP surface.
//!
//! `POST /api/discord/interactions` runs an interaction through the whole
//! pipeline: verify the signature over the raw bytes, decode, dispatch, and
//! serialize the response. Nothing is parsed before the signature checks out.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::decode::{self, DecodeError};
use crate::router::{Router, RouterError};
use crate::signature::{self, PublicKey, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::types::{Interaction, InteractionResponse};

/// Shared, read-only request state.
#[derive(Debug)]
pub struct AppState {
    /// `None` disables signature checks.
    pub public_key: Option<PublicKey>,
    pub router: Router,
}

impl AppState {
    pub fn new(config: &Config, router: Router) -> Self {
        Self {
            public_key: config.public_key,
            router,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that turns an interaction request into a non-200 reply.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid request signature")]
    Unauthorized,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::Decode(_) => "invalid_interaction",
            AppError::Router(RouterError::UnsupportedType(_)) => "unsupported_type",
            AppError::Router(RouterError::UnsupportedCommand(_)) => "unknown_command",
            AppError::Router(RouterError::MissingData) => "invalid_interaction",
            AppError::Router(RouterError::Handler(_)) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Router(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Router(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(error = %self, "failed to answer interaction");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthorized = self {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        let status = self.status();
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        });

        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

pub fn app(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/api/discord/interactions", post(interactions))
        .route("/api/reddit/callback", get(reddit_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn interactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, AppError> {
    let timestamp = headers
        .get(TIMESTAMP_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !signature::verify(state.public_key.as_ref(), timestamp, &body, signature).is_authorized() {
        warn!(body_len = body.len(), "rejected interaction with a bad signature");
        return Err(AppError::Unauthorized);
    }

    let interaction: Interaction = decode::from_slice(&body).map_err(|e| {
        warn!(path = %e.path, error = %e.kind, "undecodable interaction");
        e
    })?;

    let response = state.router.dispatch(&interaction).map_err(|e| {
        if e.is_client_error() {
            info!(interaction_id = %interaction.id, kind = %interaction.kind, error = %e, "unsupported interaction");
        }
        e
    })?;

    Ok(Json(response))
}

/// Account-linking callback. Not implemented yet.
async fn reddit_callback() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerError;
    use crate::types::InteractionType;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Router(RouterError::UnsupportedType(InteractionType::ModalSubmit)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Router(RouterError::UnsupportedCommand("ban".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Router(RouterError::Handler(HandlerError::new("boom"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn handler_detail_stays_out_of_the_reply() {
        let err = AppError::Router(RouterError::Handler(HandlerError::new("db password wrong")));
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn decode_errors_name_the_field() {
        let err: AppError = decode::from_slice::<Interaction>(br#"{"type":1}"#)
            .unwrap_err()
            .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("`id`"), "{}", err.message());
    }
}
