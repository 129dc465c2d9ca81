use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog-assigned movie identifier, stable across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A movie as shown to the user.
///
/// Values are never mutated in place: bookmark state is overlaid with
/// [`Movie::with_bookmark`], which hands back a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    /// Average user score in `[0, 10]`.
    pub vote_average: f32,
    /// Fully-qualified poster URL once mapped from the catalog.
    pub poster_path: Option<String>,
    /// Genre names, in catalog order. `None` when the source carried no genre data.
    pub genres: Option<Vec<String>>,
    pub is_bookmarked: bool,
}

impl Movie {
    pub fn with_bookmark(&self, is_bookmarked: bool) -> Self {
        Self {
            is_bookmarked,
            ..self.clone()
        }
    }
}

/// One page of a catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movies {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results_count: u32,
}

impl Movies {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Same page with every movie's bookmark flag replaced by `is_bookmarked(id)`.
    pub fn with_bookmarks(&self, is_bookmarked: impl Fn(MovieId) -> bool) -> Self {
        Self {
            results: self
                .results
                .iter()
                .map(|movie| movie.with_bookmark(is_bookmarked(movie.id)))
                .collect(),
            ..self.clone()
        }
    }
}

impl Default for Movies {
    fn default() -> Self {
        Self::empty()
    }
}
