use serde::Serialize;
use thiserror::Error;

/// Fallback text used when a failed response carries no error body.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Server error {code}: {body}")]
    ServerError { code: u16, body: String },

    #[error("{0}")]
    EmptyBody(String),

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("{0}")]
    UnknownError(String),

    #[error("{0}")]
    DatabaseError(String),
}

impl AppError {
    /// Maps a non-success HTTP status and its error body onto the taxonomy.
    pub fn from_status(code: u16, error_body: Option<String>) -> Self {
        let body = error_body
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        match code {
            400 => AppError::BadRequest(body),
            401 => AppError::Unauthorized(body),
            _ => AppError::ServerError { code, body },
        }
    }

    pub fn empty_body(code: u16) -> Self {
        AppError::EmptyBody(format!(
            "Received successful status {} but response body was null",
            code
        ))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AppError::NetworkUnavailable(_))
    }

    /// Text shown to the user for screen-level errors.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NetworkUnavailable(_) => "No Internet Connection".to_string(),
            AppError::ServerError { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::DatabaseError(format!("Database pool error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::NetworkUnavailable("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::NetworkUnavailable("Failed to connect to catalog service".to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status.as_u16(), Some(err.to_string()))
        } else {
            AppError::UnknownError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::UnknownError(format!("Malformed response body: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::DatabaseError(format!("Database task failed: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
