use super::models::{MovieResponse, MoviesResponse};
use crate::modules::catalog::domain::entities::{Movie, MovieId, Movies};
use std::collections::HashMap;

/// Maps TMDB payloads onto domain values.
///
/// Poster paths come back relative; the mapper resolves them against the
/// configured image base URL so the domain always carries full URLs.
#[derive(Debug, Clone)]
pub struct TmdbMapper {
    image_base_url: String,
}

impl TmdbMapper {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    pub fn map_movies(&self, response: MoviesResponse, genres: &HashMap<u32, String>) -> Movies {
        Movies {
            page: response.page,
            total_pages: response.total_pages,
            total_results_count: response.total_results,
            results: response
                .results
                .into_iter()
                .map(|movie| self.map_movie(movie, genres))
                .collect(),
        }
    }

    pub fn map_movie(&self, response: MovieResponse, genres: &HashMap<u32, String>) -> Movie {
        // Unknown ids are skipped rather than rendered as numbers.
        let genre_names = response.genre_id_list().map(|ids| {
            ids.iter()
                .filter_map(|id| genres.get(id).cloned())
                .collect::<Vec<_>>()
        });

        Movie {
            id: MovieId(response.id),
            poster_path: self.image_url(response.poster_path.as_deref()),
            title: response.title,
            overview: response.overview,
            vote_average: response.vote_average,
            genres: genre_names,
            is_bookmarked: false,
        }
    }

    fn image_url(&self, path: Option<&str>) -> Option<String> {
        let path = path.filter(|p| !p.trim().is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        Some(format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}
