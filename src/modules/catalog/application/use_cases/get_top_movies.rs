use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Arc;

use crate::modules::catalog::application::enrichment::BookmarkEnricher;
use crate::modules::catalog::domain::entities::Movies;
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::application::UseCase;
use crate::shared::errors::AppResult;
use crate::shared::utils::streams::distinct_until_changed;

/// One page of the top-rated listing.
pub struct GetTopMoviesUseCase {
    repository: Arc<dyn MovieRepository>,
    enricher: BookmarkEnricher,
}

impl GetTopMoviesUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>, enricher: BookmarkEnricher) -> Self {
        Self {
            repository,
            enricher,
        }
    }

    /// The page, re-annotated whenever the bookmark set changes.
    /// A failed fetch is a single `Err` emission.
    pub async fn observe(&self, page: u32) -> BoxStream<'static, AppResult<Movies>> {
        match self.execute(page).await {
            Ok(movies) => {
                distinct_until_changed(self.enricher.enrich(stream::iter([movies]))).boxed()
            }
            Err(e) => stream::iter([Err(e)]).boxed(),
        }
    }
}

#[async_trait]
impl UseCase<u32, Movies> for GetTopMoviesUseCase {
    async fn execute(&self, page: u32) -> AppResult<Movies> {
        self.repository.fetch_top_rated(page).await
    }
}
