use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;

use super::http_client::{CatalogClient, TransportResult};
use super::persistence::{BookmarkMapper, BookmarkStore};
use super::tmdb::{MoviesResponse, TmdbMapper};
use crate::modules::catalog::domain::entities::{Genre, Movie, MovieId, Movies};
use crate::modules::catalog::domain::repositories::{
    BookmarkStream, GenreRepository, MovieRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

pub const FAILED_TO_SAVE_MOVIE: &str = "Failed to save movie";
pub const FAILED_TO_DELETE_MOVIE: &str = "Failed to delete movie";

pub struct MovieRepositoryImpl {
    client: Arc<dyn CatalogClient>,
    genres: Arc<dyn GenreRepository>,
    store: Arc<dyn BookmarkStore>,
    mapper: TmdbMapper,
}

impl MovieRepositoryImpl {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        genres: Arc<dyn GenreRepository>,
        store: Arc<dyn BookmarkStore>,
        image_base_url: &str,
    ) -> Self {
        Self {
            client,
            genres,
            store,
            mapper: TmdbMapper::new(image_base_url),
        }
    }

    async fn map_page(&self, response: TransportResult<MoviesResponse>) -> AppResult<Movies> {
        let body = response?.into_result()?;
        let mapping = self.genres.get_mapping().await;
        Ok(self.mapper.map_movies(body, &mapping))
    }
}

/// Store failures always surface as database errors.
fn as_database_error(err: AppError) -> AppError {
    match err {
        AppError::DatabaseError(_) => err,
        other => AppError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl MovieRepository for MovieRepositoryImpl {
    async fn fetch_top_rated(&self, page: u32) -> AppResult<Movies> {
        let response = self.client.top_rated(page).await;
        self.map_page(response).await
    }

    async fn fetch_discover(
        &self,
        genre: Option<&Genre>,
        max_release_date: Option<&str>,
        page: u32,
    ) -> AppResult<Movies> {
        let genre_id = genre.and_then(Genre::filter_id);
        let response = self
            .client
            .discover(genre_id, max_release_date, page)
            .await;
        self.map_page(response).await
    }

    async fn fetch_detail(&self, movie_id: MovieId) -> AppResult<Movie> {
        let body = self.client.movie_detail(movie_id.0).await?.into_result()?;
        let mapping = self.genres.get_mapping().await;
        Ok(self.mapper.map_movie(body, &mapping))
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Movies> {
        if query.trim().is_empty() {
            return Ok(Movies::empty());
        }

        LogContext::search(query, Some(page), None);
        let response = self.client.search(query, page).await;
        let movies = self.map_page(response).await?;
        LogContext::search(query, Some(page), Some(movies.results.len()));
        Ok(movies)
    }

    async fn add_bookmark(&self, movie: &Movie) -> AppResult<()> {
        let entity = BookmarkMapper::to_entity(movie, Utc::now().timestamp_millis());
        let rows = self.store.insert(entity).await.map_err(as_database_error)?;

        if rows > 0 {
            log::debug!("Bookmarked movie {}", movie.id);
            Ok(())
        } else {
            Err(AppError::DatabaseError(FAILED_TO_SAVE_MOVIE.to_string()))
        }
    }

    async fn remove_bookmark(&self, movie: &Movie) -> AppResult<()> {
        let entity = BookmarkMapper::to_entity(movie, 0);
        let rows = self.store.delete(entity).await.map_err(as_database_error)?;

        if rows > 0 {
            log::debug!("Removed bookmark for movie {}", movie.id);
            Ok(())
        } else {
            Err(AppError::DatabaseError(FAILED_TO_DELETE_MOVIE.to_string()))
        }
    }

    fn observe_bookmarks(&self) -> BookmarkStream {
        self.store
            .observe_all()
            .map(|rows| {
                rows.map(|entities| {
                    entities
                        .into_iter()
                        .map(BookmarkMapper::to_domain)
                        .collect::<Vec<_>>()
                })
                .map_err(as_database_error)
            })
            .boxed()
    }
}
