pub mod entities;
pub mod repositories;

pub use entities::{Genre, Movie, MovieId, Movies, ALL_GENRES_ID};
pub use repositories::{BookmarkStream, GenreMapping, GenreRepository, MovieRepository};
