use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::modules::catalog::domain::entities::{Genre, Movie, MovieId, Movies};
use crate::shared::errors::AppResult;

/// Live list of bookmarked movies. A failed read is one `Err` item; the
/// stream keeps going.
pub type BookmarkStream = BoxStream<'static, AppResult<Vec<Movie>>>;

/// Catalog access plus bookmark passthroughs.
///
/// Implementations own status → error normalization; no transport error
/// escapes as anything other than an [`AppError`](crate::shared::AppError).
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Top-rated movies, one page.
    async fn fetch_top_rated(&self, page: u32) -> AppResult<Movies>;

    /// Discover feed sorted by release date, newest first.
    ///
    /// `None` or the "All" sentinel means unfiltered.
    async fn fetch_discover(
        &self,
        genre: Option<&Genre>,
        max_release_date: Option<&str>,
        page: u32,
    ) -> AppResult<Movies>;

    async fn fetch_detail(&self, movie_id: MovieId) -> AppResult<Movie>;

    /// Free-text search. Blank queries resolve to [`Movies::empty`] offline.
    async fn search(&self, query: &str, page: u32) -> AppResult<Movies>;

    async fn add_bookmark(&self, movie: &Movie) -> AppResult<()>;

    async fn remove_bookmark(&self, movie: &Movie) -> AppResult<()>;

    /// Every bookmarked movie, tagged `is_bookmarked = true`.
    fn observe_bookmarks(&self) -> BookmarkStream;
}
