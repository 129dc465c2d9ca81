/// In-process catalog backend for integration tests
///
/// Serves canned pages, counts calls and can be told to fail specific pages.
use async_trait::async_trait;
use showcase_lib::modules::catalog::infrastructure::http_client::{
    ApiResponse, CatalogClient, TransportResult,
};
use showcase_lib::modules::catalog::infrastructure::tmdb::{
    GenresResponse, MovieResponse, MoviesResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::factories::{genres, paged_catalog, MovieResponseFactory};

pub struct FakeCatalogClient {
    catalog: Vec<MoviesResponse>,
    failures: Mutex<HashMap<u32, TransportResult<MoviesResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalogClient {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            catalog: paged_catalog(total_items, page_size),
            failures: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn fail_page(&self, page: u32, response: TransportResult<MoviesResponse>) {
        self.failures.lock().unwrap().insert(page, response);
    }

    pub fn heal_page(&self, page: u32) {
        self.failures.lock().unwrap().remove(&page);
    }

    /// Every request so far, as `endpoint:argument`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(&self, page: u32) -> TransportResult<MoviesResponse> {
        if let Some(failure) = self.failures.lock().unwrap().get(&page) {
            return failure.clone();
        }
        let response = self
            .catalog
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_else(|| MoviesResponse {
                page,
                results: Vec::new(),
                total_pages: self.catalog.len() as u32,
                total_results: self.catalog.iter().map(|p| p.results.len() as u32).sum(),
            });
        Ok(ApiResponse::ok(response))
    }
}

#[async_trait]
impl CatalogClient for FakeCatalogClient {
    async fn top_rated(&self, page: u32) -> TransportResult<MoviesResponse> {
        self.record(format!("top_rated:{}", page));
        self.page(page)
    }

    async fn discover(
        &self,
        genre_id: Option<u32>,
        _max_release_date: Option<&str>,
        page: u32,
    ) -> TransportResult<MoviesResponse> {
        self.record(format!("discover:{:?}:{}", genre_id, page));
        self.page(page)
    }

    async fn movie_detail(&self, movie_id: i64) -> TransportResult<MovieResponse> {
        self.record(format!("movie_detail:{}", movie_id));
        Ok(ApiResponse::ok(MovieResponseFactory::new(movie_id).build()))
    }

    async fn search(&self, query: &str, page: u32) -> TransportResult<MoviesResponse> {
        self.record(format!("search:{}:{}", query, page));
        self.page(page)
    }

    async fn genres(&self) -> TransportResult<GenresResponse> {
        self.record("genres".to_string());
        Ok(ApiResponse::ok(genres()))
    }
}
