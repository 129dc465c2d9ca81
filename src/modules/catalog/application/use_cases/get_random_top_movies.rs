use futures::future::join_all;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use rand::seq::{IteratorRandom, SliceRandom};
use std::sync::Arc;

use crate::modules::catalog::application::enrichment::BookmarkEnricher;
use crate::modules::catalog::domain::entities::{Movie, Movies};
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::errors::AppResult;
use crate::shared::utils::streams::distinct_until_changed;

pub const DEFAULT_RANDOM_COUNT: usize = 20;
const RANDOM_PAGES: usize = 10;

/// A mixed selection of highly rated movies drawn from random top-rated pages.
pub struct GetRandomTopMoviesUseCase {
    repository: Arc<dyn MovieRepository>,
    enricher: BookmarkEnricher,
}

impl GetRandomTopMoviesUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>, enricher: BookmarkEnricher) -> Self {
        Self {
            repository,
            enricher,
        }
    }

    /// Page 1 decides how many pages exist; only that read can fail the
    /// whole call. Pages that fail afterwards contribute nothing.
    pub async fn invoke(&self, count: usize) -> BoxStream<'static, AppResult<Movies>> {
        let total_pages = match self.repository.fetch_top_rated(1).await {
            Ok(first) => first.total_pages,
            Err(e) => return stream::iter([Err(e)]).boxed(),
        };

        let pages = pick_pages(total_pages, RANDOM_PAGES);
        tracing::debug!(?pages, "fetching random top-rated pages");

        let fetches = pages.iter().map(|page| {
            let repository = Arc::clone(&self.repository);
            let page = *page;
            async move {
                match repository.fetch_top_rated(page).await {
                    Ok(movies) => movies.results,
                    Err(e) => {
                        log::warn!("Skipping top-rated page {}: {}", page, e);
                        Vec::new()
                    }
                }
            }
        });
        let selection = select_top(join_all(fetches).await.concat(), count);

        distinct_until_changed(self.enricher.enrich_list(stream::iter([selection])))
            .map(|list| {
                list.map(|results| Movies {
                    page: 1,
                    total_pages: 1,
                    total_results_count: results.len() as u32,
                    results,
                })
            })
            .boxed()
    }
}

/// Up to `wanted` distinct page numbers in `1..=total_pages`.
fn pick_pages(total_pages: u32, wanted: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (1..=total_pages).choose_multiple(&mut rng, wanted)
}

/// Shuffled first so equal votes come out in random order.
fn select_top(mut movies: Vec<Movie>, count: usize) -> Vec<Movie> {
    movies.shuffle(&mut rand::thread_rng());
    movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
    movies.truncate(count);
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::application::use_cases::test_repository;
    use crate::modules::catalog::infrastructure::http_client::ApiResponse;
    use crate::modules::catalog::test_support::{movie, paged_catalog, FakeCatalogClient};
    use crate::shared::errors::AppError;
    use std::collections::HashSet;

    #[test]
    fn test_pick_pages_is_capped_by_total() {
        let pages = pick_pages(3, 10);
        let distinct: HashSet<u32> = pages.iter().copied().collect();
        assert_eq!(pages.len(), 3);
        assert_eq!(distinct.len(), 3);
        assert!(pick_pages(0, 10).is_empty());
    }

    #[test]
    fn test_pick_pages_are_distinct_and_in_range() {
        let pages = pick_pages(500, 10);
        let distinct: HashSet<u32> = pages.iter().copied().collect();
        assert_eq!(distinct.len(), 10);
        assert!(pages.iter().all(|page| (1..=500).contains(page)));
    }

    #[test]
    fn test_select_top_orders_by_vote() {
        let movies: Vec<Movie> = (1..=30).map(movie).collect();
        let top = select_top(movies, 5);
        let votes: Vec<f32> = top.iter().map(|m| m.vote_average).collect();
        assert_eq!(votes, vec![9.0, 9.0, 9.0, 8.0, 8.0]);
    }

    #[tokio::test]
    async fn test_collects_count_movies_sorted_by_vote() {
        let client = Arc::new(FakeCatalogClient::with_catalog(paged_catalog(300, 20)));
        let repository = test_repository(client.clone());
        let use_case =
            GetRandomTopMoviesUseCase::new(repository.clone(), BookmarkEnricher::new(repository));

        let mut random = use_case.invoke(DEFAULT_RANDOM_COUNT).await;
        let movies = random.next().await.unwrap().unwrap();

        assert_eq!(movies.results.len(), 20);
        assert_eq!(movies.total_results_count, 20);
        assert!(movies
            .results
            .windows(2)
            .all(|pair| pair[0].vote_average >= pair[1].vote_average));
        // Page 1 for the count, then ten random pages.
        assert_eq!(client.movie_calls(), 11);
    }

    #[tokio::test]
    async fn test_failed_random_page_contributes_nothing() {
        let client = Arc::new(FakeCatalogClient::with_catalog(paged_catalog(40, 20)));
        let repository = test_repository(client.clone());
        let use_case =
            GetRandomTopMoviesUseCase::new(repository.clone(), BookmarkEnricher::new(repository));

        client.set_page(2, Ok(ApiResponse::failure(500, None)));
        let mut random = use_case.invoke(100).await;
        let movies = random.next().await.unwrap().unwrap();

        assert_eq!(movies.results.len(), 20);
        assert!(movies.results.iter().all(|m| m.id.0 <= 20));
    }

    #[tokio::test]
    async fn test_first_page_failure_fails_the_call() {
        let client = Arc::new(FakeCatalogClient::new());
        client.set_page(1, Ok(ApiResponse::failure(400, Some("bad page"))));
        let repository = test_repository(client);
        let use_case =
            GetRandomTopMoviesUseCase::new(repository.clone(), BookmarkEnricher::new(repository));

        let mut random = use_case.invoke(DEFAULT_RANDOM_COUNT).await;

        assert_eq!(
            random.next().await,
            Some(Err(AppError::BadRequest("bad page".to_string())))
        );
    }
}
