//! Incremental page loader over a page-fetch function.
//!
//! A `PageSource` turns `(page, load_size) -> Movies` into page results with
//! neighbour keys. It never fails outright: errors and panics raised while
//! fetching come back as [`LoadResult::Error`] so the caller can retry the
//! same key.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;

use crate::modules::catalog::domain::entities::{Movie, Movies};
use crate::shared::errors::{AppError, AppResult};

pub const FIRST_PAGE: u32 = 1;

/// `(page, load_size)` → one page of the catalog. Remote sources with a
/// server-fixed page size may ignore `load_size`.
pub type FetchPage = Arc<dyn Fn(u32, u32) -> BoxFuture<'static, AppResult<Movies>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    /// `None` loads the first page.
    pub key: Option<u32>,
    pub load_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub key: u32,
    pub data: Vec<Movie>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Page(Page),
    Error(AppError),
}

/// Loaded pages plus the last position the UI looked at.
#[derive(Debug, Clone, Default)]
pub struct PagingState {
    pub pages: Vec<Page>,
    pub anchor_position: Option<usize>,
}

impl PagingState {
    /// Page holding the item at `position`, clamped to the first/last page.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page> {
        let mut seen = 0;
        for page in &self.pages {
            seen += page.data.len();
            if position < seen {
                return Some(page);
            }
        }
        self.pages.last()
    }
}

pub struct PageSource {
    fetch: FetchPage,
    total_results: Arc<watch::Sender<u32>>,
}

impl PageSource {
    pub fn new(fetch: FetchPage, total_results: Arc<watch::Sender<u32>>) -> Self {
        Self {
            fetch,
            total_results,
        }
    }

    pub fn total_results(&self) -> watch::Receiver<u32> {
        self.total_results.subscribe()
    }

    pub async fn load(&self, params: LoadParams) -> LoadResult {
        let key = params.key.unwrap_or(FIRST_PAGE);

        let fetched = match std::panic::catch_unwind(AssertUnwindSafe(|| {
            (self.fetch)(key, params.load_size)
        })) {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(panic) => Err(panic),
        };

        let movies = match fetched {
            Ok(Ok(movies)) => movies,
            Ok(Err(e)) => {
                tracing::warn!(page = key, error = %e, "page load failed");
                return LoadResult::Error(e);
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(page = key, panic = %message, "page load panicked");
                return LoadResult::Error(AppError::UnknownError(message));
            }
        };

        // Published before the page is handed back: the header may read the
        // total on the same tick it renders page 1.
        if key == FIRST_PAGE {
            self.total_results.send_replace(movies.total_results_count);
        }

        let prev_key = (key > FIRST_PAGE).then(|| key - 1);
        let next_key = if movies.results.is_empty() || key >= movies.total_pages {
            None
        } else {
            Some(key + 1)
        };

        tracing::debug!(page = key, items = movies.results.len(), ?next_key, "page loaded");

        LoadResult::Page(Page {
            key,
            data: movies.results,
            prev_key,
            next_key,
        })
    }

    /// Key to restart from after invalidation; `None` restarts at page 1.
    pub fn refresh_key(state: &PagingState) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|key| key + 1)
            .or_else(|| page.next_key.map(|key| key - 1))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Page load panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::test_support::movie;
    use std::sync::Mutex;

    fn movies(page: u32, ids: std::ops::RangeInclusive<i64>, total_pages: u32) -> Movies {
        Movies {
            page,
            results: ids.map(movie).collect(),
            total_pages,
            total_results_count: 95,
        }
    }

    fn source_from(
        respond: impl Fn(u32) -> AppResult<Movies> + Send + Sync + 'static,
    ) -> (PageSource, watch::Receiver<u32>, Arc<Mutex<Vec<u32>>>) {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requested);
        let respond = Arc::new(respond);
        let fetch: FetchPage = Arc::new(move |page, _load_size| {
            log.lock().unwrap().push(page);
            let respond = Arc::clone(&respond);
            async move { respond(page) }.boxed()
        });
        let (total_tx, total_rx) = watch::channel(0);
        (PageSource::new(fetch, Arc::new(total_tx)), total_rx, requested)
    }

    fn page_of(result: LoadResult) -> Page {
        match result {
            LoadResult::Page(page) => page,
            LoadResult::Error(e) => panic!("expected a page, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_single_page_has_no_neighbours() {
        let (source, _, _) = source_from(|page| Ok(movies(page, 1..=5, 1)));

        let page = page_of(source.load(LoadParams { key: None, load_size: 20 }).await);

        assert_eq!(page.key, 1);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.prev_key, None);
        assert_eq!(page.next_key, None);
    }

    #[tokio::test]
    async fn test_middle_page_keys() {
        let (source, _, requested) = source_from(|page| Ok(movies(page, 21..=40, 5)));

        let page = page_of(source.load(LoadParams { key: Some(2), load_size: 20 }).await);

        assert_eq!(page.prev_key, Some(1));
        assert_eq!(page.next_key, Some(3));
        assert_eq!(*requested.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_last_or_empty_page_ends_pagination() {
        let (source, _, _) = source_from(|page| match page {
            5 => Ok(movies(page, 81..=95, 5)),
            _ => Ok(Movies {
                page,
                results: Vec::new(),
                total_pages: 9,
                total_results_count: 95,
            }),
        });

        let last = page_of(source.load(LoadParams { key: Some(5), load_size: 20 }).await);
        let empty = page_of(source.load(LoadParams { key: Some(3), load_size: 20 }).await);

        assert_eq!(last.next_key, None);
        assert_eq!(empty.next_key, None);
        assert_eq!(empty.prev_key, Some(2));
    }

    #[tokio::test]
    async fn test_total_is_captured_from_first_page_only() {
        let (source, total, _) = source_from(|page| {
            let mut result = movies(page, 1..=20, 5);
            result.total_results_count = if page == 1 { 95 } else { 999 };
            Ok(result)
        });

        source.load(LoadParams { key: None, load_size: 20 }).await;
        assert_eq!(*total.borrow(), 95);

        source.load(LoadParams { key: Some(2), load_size: 20 }).await;
        source.load(LoadParams { key: Some(3), load_size: 20 }).await;
        assert_eq!(*total.borrow(), 95);
    }

    #[tokio::test]
    async fn test_fetch_error_becomes_load_error() {
        let (source, total, _) =
            source_from(|_| Err(AppError::NetworkUnavailable("offline".to_string())));

        let result = source.load(LoadParams { key: None, load_size: 20 }).await;

        assert_eq!(
            result,
            LoadResult::Error(AppError::NetworkUnavailable("offline".to_string()))
        );
        assert_eq!(*total.borrow(), 0);
    }

    #[tokio::test]
    async fn test_panic_in_fetch_becomes_load_error() {
        let (source, _, _) = source_from(|_| panic!("mapping blew up"));

        let result = source.load(LoadParams { key: Some(2), load_size: 20 }).await;

        assert_eq!(
            result,
            LoadResult::Error(AppError::UnknownError("mapping blew up".to_string()))
        );

        // The source stays usable.
        let again = source.load(LoadParams { key: Some(2), load_size: 20 }).await;
        assert!(matches!(again, LoadResult::Error(_)));
    }

    fn loaded_page(key: u32, size: usize, last: u32) -> Page {
        Page {
            key,
            data: (0..size as i64).map(|i| movie(key as i64 * 100 + i)).collect(),
            prev_key: (key > 1).then(|| key - 1),
            next_key: (key < last).then(|| key + 1),
        }
    }

    #[test]
    fn test_refresh_key_prefers_prev_key() {
        let state = PagingState {
            pages: vec![loaded_page(1, 20, 3), loaded_page(2, 20, 3), loaded_page(3, 20, 3)],
            anchor_position: Some(25),
        };
        assert_eq!(PageSource::refresh_key(&state), Some(2));
    }

    #[test]
    fn test_refresh_key_falls_back_to_next_key() {
        let state = PagingState {
            pages: vec![loaded_page(1, 20, 3)],
            anchor_position: Some(3),
        };
        assert_eq!(PageSource::refresh_key(&state), Some(1));
    }

    #[test]
    fn test_refresh_key_without_anchor_restarts() {
        let state = PagingState {
            pages: vec![loaded_page(1, 20, 1)],
            anchor_position: None,
        };
        assert_eq!(PageSource::refresh_key(&state), None);

        let lone = PagingState {
            pages: vec![loaded_page(1, 20, 1)],
            anchor_position: Some(0),
        };
        assert_eq!(PageSource::refresh_key(&lone), None);
    }

    #[test]
    fn test_anchor_past_the_end_uses_last_page() {
        let state = PagingState {
            pages: vec![loaded_page(1, 20, 4), loaded_page(2, 20, 4)],
            anchor_position: Some(500),
        };
        assert_eq!(PageSource::refresh_key(&state), Some(2));
    }
}
