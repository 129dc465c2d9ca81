pub mod mapper;
pub mod models;

pub use mapper::TmdbMapper;
pub use models::{GenreResponse, GenresResponse, MovieResponse, MoviesResponse};
