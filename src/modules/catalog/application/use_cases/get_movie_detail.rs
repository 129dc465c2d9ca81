use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Arc;

use crate::modules::catalog::application::enrichment::BookmarkEnricher;
use crate::modules::catalog::domain::entities::{Movie, MovieId};
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::errors::AppResult;
use crate::shared::utils::streams::distinct_until_changed;

/// A single movie with live bookmark membership.
pub struct GetMovieDetailUseCase {
    repository: Arc<dyn MovieRepository>,
    enricher: BookmarkEnricher,
}

impl GetMovieDetailUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>, enricher: BookmarkEnricher) -> Self {
        Self {
            repository,
            enricher,
        }
    }

    pub async fn invoke(&self, movie_id: MovieId) -> BoxStream<'static, AppResult<Movie>> {
        match self.repository.fetch_detail(movie_id).await {
            Ok(movie) => distinct_until_changed(self.enricher.enrich(stream::iter([movie]))).boxed(),
            Err(e) => stream::iter([Err(e)]).boxed(),
        }
    }
}
