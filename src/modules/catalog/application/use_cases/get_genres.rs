use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::domain::entities::Genre;
use crate::modules::catalog::domain::repositories::GenreRepository;
use crate::shared::application::UseCase;
use crate::shared::errors::AppResult;

pub struct GetGenresUseCase {
    genres: Arc<dyn GenreRepository>,
}

impl GetGenresUseCase {
    pub fn new(genres: Arc<dyn GenreRepository>) -> Self {
        Self { genres }
    }
}

#[async_trait]
impl UseCase<(), Vec<Genre>> for GetGenresUseCase {
    async fn execute(&self, _: ()) -> AppResult<Vec<Genre>> {
        self.genres.get_all().await
    }
}
