/// Test data factories for catalog responses
use showcase_lib::modules::catalog::infrastructure::tmdb::{
    GenreResponse, GenresResponse, MovieResponse, MoviesResponse,
};

pub struct MovieResponseFactory {
    id: i64,
    title: Option<String>,
    vote_average: f32,
    poster_path: Option<String>,
    genre_ids: Option<Vec<u32>>,
}

impl MovieResponseFactory {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            vote_average: (id % 10) as f32,
            poster_path: Some(format!("/poster-{}.jpg", id)),
            genre_ids: Some(vec![28]),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn vote_average(mut self, vote_average: f32) -> Self {
        self.vote_average = vote_average;
        self
    }

    pub fn genre_ids(mut self, genre_ids: Vec<u32>) -> Self {
        self.genre_ids = Some(genre_ids);
        self
    }

    pub fn build(self) -> MovieResponse {
        MovieResponse {
            id: self.id,
            title: self.title.unwrap_or_else(|| format!("Movie {}", self.id)),
            overview: format!("Overview {}", self.id),
            vote_average: self.vote_average,
            poster_path: self.poster_path,
            genre_ids: self.genre_ids,
            genres: None,
        }
    }
}

/// `total_items` movies with ids `1..=total_items`, split into pages of `page_size`
pub fn paged_catalog(total_items: usize, page_size: usize) -> Vec<MoviesResponse> {
    let ids: Vec<i64> = (1..=total_items as i64).collect();
    let total_pages = ids.chunks(page_size).count() as u32;
    ids.chunks(page_size)
        .enumerate()
        .map(|(index, chunk)| MoviesResponse {
            page: index as u32 + 1,
            results: chunk
                .iter()
                .map(|id| MovieResponseFactory::new(*id).build())
                .collect(),
            total_pages,
            total_results: total_items as u32,
        })
        .collect()
}

pub fn genres() -> GenresResponse {
    GenresResponse {
        genres: vec![
            GenreResponse {
                id: 28,
                name: "Action".to_string(),
            },
            GenreResponse {
                id: 35,
                name: "Comedy".to_string(),
            },
        ],
    }
}
