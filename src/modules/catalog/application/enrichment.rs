//! Overlays live bookmark membership onto catalog data.
//!
//! The bookmarked-id set is derived from the repository's bookmark stream and
//! combined (latest-with-latest) with whatever the screen is showing, so a
//! bookmark toggle re-annotates already loaded items without touching the
//! network.
//!
//! A failed bookmark read never reads as "nothing is bookmarked": once a good
//! set has been seen, failures are logged and the last good set stays in
//! effect; a failure before the first good read is passed downstream.

use futures::future;
use futures::{Stream, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

use super::paging::PagingData;
use crate::modules::catalog::domain::entities::{Movie, MovieId, Movies};
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::errors::AppResult;
use crate::shared::utils::streams::{combine_latest, distinct_until_changed};

pub type BookmarkedIds = Arc<HashSet<MovieId>>;

/// Anything whose movies can carry a bookmark flag.
pub trait BookmarkAware {
    fn with_bookmarked(&self, ids: &HashSet<MovieId>) -> Self;
}

impl BookmarkAware for Movie {
    fn with_bookmarked(&self, ids: &HashSet<MovieId>) -> Self {
        self.with_bookmark(ids.contains(&self.id))
    }
}

impl BookmarkAware for Vec<Movie> {
    fn with_bookmarked(&self, ids: &HashSet<MovieId>) -> Self {
        self.iter().map(|movie| movie.with_bookmarked(ids)).collect()
    }
}

impl BookmarkAware for Movies {
    fn with_bookmarked(&self, ids: &HashSet<MovieId>) -> Self {
        self.with_bookmarks(|id| ids.contains(&id))
    }
}

impl BookmarkAware for PagingData {
    fn with_bookmarked(&self, ids: &HashSet<MovieId>) -> Self {
        self.map_items(|movie| movie.with_bookmarked(ids))
    }
}

#[derive(Clone)]
pub struct BookmarkEnricher {
    repository: Arc<dyn MovieRepository>,
}

impl BookmarkEnricher {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }

    /// Live set of bookmarked ids, emitted only when it changes.
    pub fn bookmarked_ids(&self) -> impl Stream<Item = AppResult<BookmarkedIds>> + Send + 'static {
        let mut has_good_read = false;

        let held = self
            .repository
            .observe_bookmarks()
            .filter_map(move |result| {
                let next = match result {
                    Ok(movies) => {
                        has_good_read = true;
                        Some(Ok(movies.iter().map(|movie| movie.id).collect::<HashSet<_>>()))
                    }
                    Err(e) if has_good_read => {
                        tracing::warn!(error = %e, "bookmark read failed, keeping last known set");
                        None
                    }
                    Err(e) => Some(Err(e)),
                };
                future::ready(next)
            });

        distinct_until_changed(held).map(|ids| ids.map(Arc::new))
    }

    /// Annotates every emission of `source` with the latest bookmark set, and
    /// re-emits the latest `source` value whenever the set changes.
    pub fn enrich<S, T>(&self, source: S) -> impl Stream<Item = AppResult<T>> + Send + 'static
    where
        S: Stream<Item = T> + Send + 'static,
        T: BookmarkAware + Send + 'static,
    {
        combine_latest(source, self.bookmarked_ids(), |item: &T, ids| match ids {
            Ok(ids) => Ok(item.with_bookmarked(ids)),
            Err(e) => Err(e.clone()),
        })
    }

    /// [`enrich`](Self::enrich) for flat movie lists.
    pub fn enrich_list<S>(&self, source: S) -> impl Stream<Item = AppResult<Vec<Movie>>> + Send + 'static
    where
        S: Stream<Item = Vec<Movie>> + Send + 'static,
    {
        self.enrich(source)
    }
}
