use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised by recommendation providers
///
/// These are never turned into domain 404s; the router surfaces them as
/// internal errors and logs the cause.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("User {0} is unknown to the provider")]
    UnknownUser(i64),

    #[error("No recommendations loaded for model {0}")]
    ModelNotLoaded(String),

    #[error("Upstream model server error: {0}")]
    Upstream(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Authorization failed")]
    Unauthorized,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    /// Carries the id as written so ids beyond `i64` are reported verbatim
    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Model {0} not found")]
    ModelNotFound(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotAuthenticated | AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UserNotFound(_) | AppError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Provider(e) => {
                tracing::error!(error = %e, "Recommendation provider failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
