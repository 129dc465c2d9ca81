pub mod genre;
pub mod movie;

pub use genre::{Genre, ALL_GENRES_ID};
pub use movie::{Movie, MovieId, Movies};
