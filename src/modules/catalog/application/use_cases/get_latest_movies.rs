use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

use crate::modules::catalog::application::enrichment::BookmarkEnricher;
use crate::modules::catalog::application::paging::{FetchPage, Pager, PagingConfig, PagingData};
use crate::modules::catalog::domain::entities::Genre;
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::errors::AppResult;

/// A live paged feed: drive it through `pager`, render `movies`.
pub struct PagedMovies {
    pub pager: Arc<Pager>,
    pub movies: BoxStream<'static, AppResult<PagingData>>,
    pub total_results: watch::Receiver<u32>,
}

/// Released movies, newest first, optionally filtered by genre.
pub struct GetLatestMoviesUseCase {
    repository: Arc<dyn MovieRepository>,
    enricher: BookmarkEnricher,
    config: PagingConfig,
}

impl GetLatestMoviesUseCase {
    pub fn new(
        repository: Arc<dyn MovieRepository>,
        enricher: BookmarkEnricher,
        config: PagingConfig,
    ) -> Self {
        Self {
            repository,
            enricher,
            config,
        }
    }

    /// Opens a new session. Nothing is fetched until `pager.refresh()`.
    pub fn invoke(&self, genre: Option<Genre>) -> PagedMovies {
        let release_cutoff = today();
        let repository = Arc::clone(&self.repository);

        let fetch: FetchPage = Arc::new(move |page, _load_size| {
            let repository = Arc::clone(&repository);
            let genre = genre.clone();
            let release_cutoff = release_cutoff.clone();
            async move {
                repository
                    .fetch_discover(genre.as_ref(), Some(&release_cutoff), page)
                    .await
            }
            .boxed()
        });

        let pager = Arc::new(Pager::new(self.config, fetch));
        let movies = self.enricher.enrich(pager.stream()).boxed();
        let total_results = pager.total_results();

        PagedMovies {
            pager,
            movies,
            total_results,
        }
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
