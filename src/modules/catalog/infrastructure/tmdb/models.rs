use serde::{Deserialize, Serialize};

// Response envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesResponse {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieResponse>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenresResponse {
    #[serde(default)]
    pub genres: Vec<GenreResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreResponse {
    pub id: u32,
    pub name: String,
}

/// Raw movie record. List endpoints send `genre_ids`; the detail endpoint
/// sends `genres` objects instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResponse {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub genres: Option<Vec<GenreResponse>>,
}

impl MovieResponse {
    /// Genre ids regardless of which shape the endpoint used.
    pub fn genre_id_list(&self) -> Option<Vec<u32>> {
        match (&self.genre_ids, &self.genres) {
            (Some(ids), _) => Some(ids.clone()),
            (None, Some(genres)) => Some(genres.iter().map(|genre| genre.id).collect()),
            (None, None) => None,
        }
    }
}
