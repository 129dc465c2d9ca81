use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::domain::entities::Movie;
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::application::UseCase;
use crate::shared::errors::AppResult;

/// Removes a bookmarked movie, bookmarks any other.
pub struct ToggleBookmarkUseCase {
    repository: Arc<dyn MovieRepository>,
}

impl ToggleBookmarkUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<Movie, ()> for ToggleBookmarkUseCase {
    async fn execute(&self, movie: Movie) -> AppResult<()> {
        if movie.is_bookmarked {
            self.repository.remove_bookmark(&movie).await
        } else {
            self.repository.add_bookmark(&movie).await
        }
    }
}
