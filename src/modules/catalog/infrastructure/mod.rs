pub mod genre_index;
pub mod http_client;
pub mod movie_repository_impl;
pub mod persistence;
pub mod tmdb;

pub use genre_index::GenreIndex;
pub use http_client::{CatalogClient, TmdbClient};
pub use movie_repository_impl::MovieRepositoryImpl;
pub use persistence::{BookmarkStore, SqliteBookmarkStore};
