pub mod get_bookmarked_movies;
pub mod get_genres;
pub mod get_latest_movies;
pub mod get_movie_detail;
pub mod get_random_top_movies;
pub mod get_single_latest_movie;
pub mod get_top_movies;
pub mod toggle_bookmark;

pub use get_bookmarked_movies::GetBookmarkedMoviesUseCase;
pub use get_genres::GetGenresUseCase;
pub use get_latest_movies::{GetLatestMoviesUseCase, PagedMovies};
pub use get_movie_detail::GetMovieDetailUseCase;
pub use get_random_top_movies::{GetRandomTopMoviesUseCase, DEFAULT_RANDOM_COUNT};
pub use get_single_latest_movie::GetSingleLatestMovieUseCase;
pub use get_top_movies::GetTopMoviesUseCase;
pub use toggle_bookmark::ToggleBookmarkUseCase;

#[cfg(test)]
pub(crate) fn test_repository(
    client: std::sync::Arc<crate::modules::catalog::test_support::FakeCatalogClient>,
) -> std::sync::Arc<dyn crate::modules::catalog::domain::repositories::MovieRepository> {
    use crate::modules::catalog::infrastructure::{GenreIndex, MovieRepositoryImpl};
    use crate::modules::catalog::test_support::{InMemoryBookmarkStore, IMAGE_BASE_URL};
    use std::sync::Arc;

    let genres = Arc::new(GenreIndex::new(client.clone()));
    Arc::new(MovieRepositoryImpl::new(
        client,
        genres,
        Arc::new(InMemoryBookmarkStore::new()),
        IMAGE_BASE_URL,
    ))
}
