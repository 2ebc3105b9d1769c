use axum::Json;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to the Cookbook Sandbox Application";

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// GET / — static welcome payload.
pub async fn root() -> Json<WelcomeResponse> {
    tracing::trace!("serving welcome message");

    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}
