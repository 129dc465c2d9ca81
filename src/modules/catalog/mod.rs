pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_support;

// Re-exports for easy external access
pub use application::{BookmarkEnricher, Pager, PagingConfig, PagingData, SearchPipeline, SearchState};
pub use domain::{Genre, Movie, MovieId, Movies, MovieRepository, GenreRepository};
pub use infrastructure::{GenreIndex, MovieRepositoryImpl, SqliteBookmarkStore, TmdbClient};
