//! TMDB HTTP client with rate limiting and retry logic.
//!
//! Every request carries the bearer token, waits on the governor quota, and
//! retries 429/5xx/connect failures according to [`RetryPolicy`]. Responses
//! are handed back raw as [`ApiResponse`] for the repository to normalize.

use super::catalog_client::{ApiResponse, CatalogClient, TransportError, TransportResult};
use super::retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::modules::catalog::domain::entities::ALL_GENRES_ID;
use crate::modules::catalog::infrastructure::tmdb::models::{
    GenresResponse, MovieResponse, MoviesResponse,
};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, Stopwatch};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use tokio::time::sleep;

pub struct TmdbClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
    base_url: String,
    access_token: String,
}

impl TmdbClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::UnknownError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(config.requests_per_second),
            retry_policy: RetryPolicy::tmdb(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn create_rate_limiter(requests_per_second: u32) -> DefaultDirectRateLimiter {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        RateLimiter::direct(Quota::per_second(rate))
    }

    async fn get<T>(&self, endpoint: &str, url: String) -> TransportResult<T>
    where
        T: DeserializeOwned,
    {
        let timer = Stopwatch::start();
        let max_attempts = self.retry_policy.max_retries + 1;

        let mut attempt = 0;
        loop {
            self.rate_limiter.until_ready().await;

            let sent = self
                .client
                .get(&url)
                .bearer_auth(&self.access_token)
                .header(ACCEPT, "application/json")
                .send()
                .await;

            match sent {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if is_retryable_status(status) && attempt < self.retry_policy.max_retries {
                        let info = RateLimitInfo::from_headers(response.headers());
                        let delay = self.retry_policy.calculate_delay(attempt, info.retry_after);
                        LogContext::catalog_retry(
                            endpoint,
                            &format!("returned {}", status),
                            attempt + 1,
                            max_attempts,
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let result = Self::read_response(response).await;
                    LogContext::catalog_call(endpoint, status, attempt + 1, timer.elapsed_ms());
                    return result;
                }
                Err(e) => {
                    if is_retryable_error(&e) && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        LogContext::catalog_retry(
                            endpoint,
                            &format!("failed: {}", e),
                            attempt + 1,
                            max_attempts,
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    LogContext::failure(&e, &format!("Catalog {}", endpoint));
                    return Err(TransportError::from(e));
                }
            }
        }
    }

    async fn read_response<T>(response: Response) -> TransportResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(TransportError::from)?;
        let blank = text.trim().is_empty() || text.trim() == "null";

        if !(200..300).contains(&status) {
            return Ok(ApiResponse {
                status,
                body: None,
                error_body: (!blank).then_some(text),
            });
        }
        if blank {
            return Ok(ApiResponse::empty(status));
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            TransportError::Decode(format!(
                "{} (status {}): {}",
                e,
                status,
                text.chars().take(200).collect::<String>()
            ))
        })?;

        Ok(ApiResponse {
            status,
            body: Some(body),
            error_body: None,
        })
    }
}

pub(crate) fn top_rated_url(base_url: &str, page: u32) -> String {
    format!("{}/movie/top_rated?page={}", base_url, page)
}

pub(crate) fn discover_url(
    base_url: &str,
    genre_id: Option<u32>,
    max_release_date: Option<&str>,
    page: u32,
) -> String {
    let mut url = format!(
        "{}/discover/movie?sort_by=primary_release_date.desc",
        base_url
    );
    if let Some(date) = max_release_date.filter(|d| !d.trim().is_empty()) {
        url.push_str(&format!(
            "&primary_release_date.lte={}",
            urlencoding::encode(date)
        ));
    }
    if let Some(id) = genre_id.filter(|id| *id != ALL_GENRES_ID) {
        url.push_str(&format!("&with_genres={}", id));
    }
    url.push_str(&format!("&page={}", page));
    url
}

pub(crate) fn movie_detail_url(base_url: &str, movie_id: i64) -> String {
    format!("{}/movie/{}", base_url, movie_id)
}

pub(crate) fn search_url(base_url: &str, query: &str, page: u32) -> String {
    format!(
        "{}/search/movie?query={}&page={}",
        base_url,
        urlencoding::encode(query),
        page
    )
}

pub(crate) fn genres_url(base_url: &str) -> String {
    format!("{}/genre/movie/list", base_url)
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn top_rated(&self, page: u32) -> TransportResult<MoviesResponse> {
        self.get("/movie/top_rated", top_rated_url(&self.base_url, page))
            .await
    }

    async fn discover(
        &self,
        genre_id: Option<u32>,
        max_release_date: Option<&str>,
        page: u32,
    ) -> TransportResult<MoviesResponse> {
        self.get(
            "/discover/movie",
            discover_url(&self.base_url, genre_id, max_release_date, page),
        )
        .await
    }

    async fn movie_detail(&self, movie_id: i64) -> TransportResult<MovieResponse> {
        self.get("/movie/{id}", movie_detail_url(&self.base_url, movie_id))
            .await
    }

    async fn search(&self, query: &str, page: u32) -> TransportResult<MoviesResponse> {
        self.get("/search/movie", search_url(&self.base_url, query, page))
            .await
    }

    async fn genres(&self) -> TransportResult<GenresResponse> {
        self.get("/genre/movie/list", genres_url(&self.base_url))
            .await
    }
}
