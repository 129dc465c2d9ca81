use super::models::BookmarkEntity;
use crate::modules::catalog::domain::entities::{Movie, MovieId};

pub struct BookmarkMapper;

impl BookmarkMapper {
    /// Genres are not persisted.
    pub fn to_entity(movie: &Movie, bookmarked_at: i64) -> BookmarkEntity {
        BookmarkEntity {
            id: movie.id.0,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            vote_average: movie.vote_average,
            poster_path: movie.poster_path.clone(),
            bookmarked_at,
        }
    }

    /// The stored poster path is already a full URL and passes through as is.
    pub fn to_domain(entity: BookmarkEntity) -> Movie {
        Movie {
            id: MovieId(entity.id),
            title: entity.title,
            overview: entity.overview,
            vote_average: entity.vote_average,
            poster_path: entity.poster_path,
            genres: None,
            is_bookmarked: true,
        }
    }
}
