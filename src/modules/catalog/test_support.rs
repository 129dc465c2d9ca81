//! Fakes and fixtures shared by the catalog unit tests.

use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::domain::entities::{Movie, MovieId};
use super::infrastructure::http_client::{ApiResponse, CatalogClient, TransportResult};
use super::infrastructure::persistence::{BookmarkEntity, BookmarkEntityStream, BookmarkStore};
use super::infrastructure::tmdb::models::{
    GenreResponse, GenresResponse, MovieResponse, MoviesResponse,
};
use crate::shared::errors::AppResult;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280/";

pub fn movie_response(id: i64) -> MovieResponse {
    MovieResponse {
        id,
        title: format!("Movie {}", id),
        overview: format!("Overview {}", id),
        vote_average: (id % 10) as f32,
        poster_path: Some(format!("/poster-{}.jpg", id)),
        genre_ids: Some(vec![18]),
        genres: None,
    }
}

/// `total_items` movies with ids `1..=total_items`, split into pages.
pub fn paged_catalog(total_items: usize, page_size: usize) -> Vec<MoviesResponse> {
    let ids: Vec<i64> = (1..=total_items as i64).collect();
    let total_pages = ids.chunks(page_size).count() as u32;
    ids.chunks(page_size)
        .enumerate()
        .map(|(index, chunk)| MoviesResponse {
            page: index as u32 + 1,
            results: chunk.iter().copied().map(movie_response).collect(),
            total_pages,
            total_results: total_items as u32,
        })
        .collect()
}

pub fn movie(id: i64) -> Movie {
    Movie {
        id: MovieId(id),
        title: format!("Movie {}", id),
        overview: format!("Overview {}", id),
        vote_average: (id % 10) as f32,
        poster_path: Some(format!("{}poster-{}.jpg", IMAGE_BASE_URL, id)),
        genres: Some(vec!["Drama".to_string()]),
        is_bookmarked: false,
    }
}

/// Catalog client backed by canned pages, counting every call.
pub struct FakeCatalogClient {
    catalog: Mutex<Vec<MoviesResponse>>,
    page_overrides: Mutex<HashMap<u32, TransportResult<MoviesResponse>>>,
    top_rated_override: Mutex<Option<TransportResult<MoviesResponse>>>,
    detail: Mutex<Option<TransportResult<MovieResponse>>>,
    genres: Mutex<TransportResult<GenresResponse>>,
    movie_calls: Arc<Mutex<usize>>,
    genre_calls: Arc<Mutex<usize>>,
    requested_genres: Mutex<Vec<Option<u32>>>,
    requested_queries: Mutex<Vec<String>>,
    search_delays: Mutex<HashMap<String, std::time::Duration>>,
}

impl FakeCatalogClient {
    pub fn new() -> Self {
        Self::with_catalog(paged_catalog(45, 20))
    }

    pub fn with_catalog(catalog: Vec<MoviesResponse>) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            page_overrides: Mutex::new(HashMap::new()),
            top_rated_override: Mutex::new(None),
            detail: Mutex::new(None),
            genres: Mutex::new(Ok(ApiResponse::ok(Self::default_genres()))),
            movie_calls: Arc::new(Mutex::new(0)),
            genre_calls: Arc::new(Mutex::new(0)),
            requested_genres: Mutex::new(Vec::new()),
            requested_queries: Mutex::new(Vec::new()),
            search_delays: Mutex::new(HashMap::new()),
        }
    }

    /// Holds every search for `query` for `delay` before answering.
    pub fn delay_search(&self, query: &str, delay: std::time::Duration) {
        self.search_delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
    }

    pub fn default_genres() -> GenresResponse {
        GenresResponse {
            genres: vec![
                GenreResponse {
                    id: 18,
                    name: "Drama".to_string(),
                },
                GenreResponse {
                    id: 53,
                    name: "Thriller".to_string(),
                },
            ],
        }
    }

    pub fn set_page(&self, page: u32, response: TransportResult<MoviesResponse>) {
        self.page_overrides.lock().unwrap().insert(page, response);
    }

    /// Answers every top-rated request with `response`, leaving other listings alone.
    pub fn set_top_rated(&self, response: TransportResult<MoviesResponse>) {
        *self.top_rated_override.lock().unwrap() = Some(response);
    }

    pub fn clear_page(&self, page: u32) {
        self.page_overrides.lock().unwrap().remove(&page);
    }

    pub fn set_detail(&self, response: TransportResult<MovieResponse>) {
        *self.detail.lock().unwrap() = Some(response);
    }

    pub fn set_genres(&self, response: TransportResult<GenresResponse>) {
        *self.genres.lock().unwrap() = response;
    }

    pub fn movie_calls(&self) -> usize {
        *self.movie_calls.lock().unwrap()
    }

    pub fn genre_calls(&self) -> usize {
        *self.genre_calls.lock().unwrap()
    }

    pub fn requested_genres(&self) -> Vec<Option<u32>> {
        self.requested_genres.lock().unwrap().clone()
    }

    pub fn requested_queries(&self) -> Vec<String> {
        self.requested_queries.lock().unwrap().clone()
    }

    fn page(&self, page: u32) -> TransportResult<MoviesResponse> {
        *self.movie_calls.lock().unwrap() += 1;

        if let Some(response) = self.page_overrides.lock().unwrap().get(&page) {
            return response.clone();
        }

        let catalog = self.catalog.lock().unwrap();
        let response = catalog
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_else(|| MoviesResponse {
                page,
                results: Vec::new(),
                total_pages: catalog.len() as u32,
                total_results: catalog.iter().map(|p| p.results.len() as u32).sum(),
            });
        Ok(ApiResponse::ok(response))
    }
}

#[async_trait]
impl CatalogClient for FakeCatalogClient {
    async fn top_rated(&self, page: u32) -> TransportResult<MoviesResponse> {
        let overridden = self.top_rated_override.lock().unwrap().clone();
        if let Some(response) = overridden {
            *self.movie_calls.lock().unwrap() += 1;
            return response;
        }
        self.page(page)
    }

    async fn discover(
        &self,
        genre_id: Option<u32>,
        _max_release_date: Option<&str>,
        page: u32,
    ) -> TransportResult<MoviesResponse> {
        self.requested_genres.lock().unwrap().push(genre_id);
        self.page(page)
    }

    async fn movie_detail(&self, movie_id: i64) -> TransportResult<MovieResponse> {
        *self.movie_calls.lock().unwrap() += 1;
        match self.detail.lock().unwrap().clone() {
            Some(response) => response,
            None => Ok(ApiResponse::ok(movie_response(movie_id))),
        }
    }

    async fn search(&self, query: &str, page: u32) -> TransportResult<MoviesResponse> {
        self.requested_queries.lock().unwrap().push(query.to_string());
        let delay = self.search_delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.page(page)
    }

    async fn genres(&self) -> TransportResult<GenresResponse> {
        *self.genre_calls.lock().unwrap() += 1;
        self.genres.lock().unwrap().clone()
    }
}

/// Bookmark table kept in a watch channel.
pub struct InMemoryBookmarkStore {
    rows: watch::Sender<Vec<BookmarkEntity>>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        let (rows, _) = watch::channel(Vec::new());
        Self { rows }
    }

    pub fn ids(&self) -> Vec<i64> {
        self.rows.borrow().iter().map(|row| row.id).collect()
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn insert(&self, entity: BookmarkEntity) -> AppResult<i64> {
        self.rows.send_modify(|rows| {
            rows.retain(|row| row.id != entity.id);
            rows.push(entity);
        });
        Ok(1)
    }

    async fn delete(&self, entity: BookmarkEntity) -> AppResult<i64> {
        let mut removed = 0;
        self.rows.send_if_modified(|rows| {
            let before = rows.len();
            rows.retain(|row| row.id != entity.id);
            removed = (before - rows.len()) as i64;
            removed > 0
        });
        Ok(removed)
    }

    fn observe_all(&self) -> BookmarkEntityStream {
        WatchStream::new(self.rows.subscribe()).map(Ok).boxed()
    }
}
