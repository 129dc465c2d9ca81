//! Seam between the repository and the remote catalog.
//!
//! The client only moves bytes: it hands back the raw status, the decoded
//! body (if any) and the error body text. Turning those into domain errors is
//! the repository's job.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::catalog::infrastructure::tmdb::models::{
    GenresResponse, MovieResponse, MoviesResponse,
};
use crate::shared::errors::{AppError, AppResult};

/// Raw HTTP outcome of one catalog call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: Option<T>,
    pub error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: 200,
            body: Some(body),
            error_body: None,
        }
    }

    /// Failed status with an optional error payload.
    pub fn failure(status: u16, error_body: Option<&str>) -> Self {
        Self {
            status,
            body: None,
            error_body: error_body.map(str::to_string),
        }
    }

    /// Success status without a body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            error_body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Normalizes status and body presence into the error taxonomy.
    pub fn into_result(self) -> AppResult<T> {
        if !self.is_success() {
            return Err(AppError::from_status(self.status, self.error_body));
        }
        self.body.ok_or_else(|| AppError::empty_body(self.status))
    }
}

/// Failures below the HTTP status level.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout | TransportError::Connect(_) => {
                AppError::NetworkUnavailable(err.to_string())
            }
            TransportError::Decode(_) | TransportError::Other(_) => {
                AppError::UnknownError(err.to_string())
            }
        }
    }
}

pub type TransportResult<T> = Result<ApiResponse<T>, TransportError>;

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn top_rated(&self, page: u32) -> TransportResult<MoviesResponse>;

    /// `genre_id` of `None` or `0` means no genre filter.
    async fn discover(
        &self,
        genre_id: Option<u32>,
        max_release_date: Option<&str>,
        page: u32,
    ) -> TransportResult<MoviesResponse>;

    async fn movie_detail(&self, movie_id: i64) -> TransportResult<MovieResponse>;

    async fn search(&self, query: &str, page: u32) -> TransportResult<MoviesResponse>;

    async fn genres(&self) -> TransportResult<GenresResponse>;
}
