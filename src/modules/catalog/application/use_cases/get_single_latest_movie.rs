use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::domain::entities::Movie;
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::application::UseCase;
use crate::shared::errors::AppResult;

/// Newest released movie across all genres, if the catalog has any.
pub struct GetSingleLatestMovieUseCase {
    repository: Arc<dyn MovieRepository>,
}

impl GetSingleLatestMovieUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<(), Option<Movie>> for GetSingleLatestMovieUseCase {
    async fn execute(&self, _: ()) -> AppResult<Option<Movie>> {
        let release_cutoff = chrono::Local::now().format("%Y-%m-%d").to_string();
        let movies = self
            .repository
            .fetch_discover(None, Some(&release_cutoff), 1)
            .await?;
        Ok(movies.results.into_iter().next())
    }
}
