pub mod genre_repository;
pub mod movie_repository;

pub use genre_repository::{GenreMapping, GenreRepository};
pub use movie_repository::{BookmarkStream, MovieRepository};
