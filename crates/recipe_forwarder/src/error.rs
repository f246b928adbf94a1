use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_logging::recipe_error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Recipe ID is required")]
    MissingRecipeId,

    #[error("Invalid action. Use: search, random, detail, byCategory, categories")]
    InvalidAction,

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// Provider answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Details stay in the log; the client only sees a generic message.
    #[error("Internal server error")]
    Internal(String),
}

impl ForwardError {
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::MissingApiKey | ForwardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ForwardError::MissingRecipeId
            | ForwardError::InvalidAction
            | ForwardError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ForwardError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        if let ForwardError::Internal(detail) = &self {
            recipe_error!("Forwarding failed: {}", detail);
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
