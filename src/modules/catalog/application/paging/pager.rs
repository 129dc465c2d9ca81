//! Load session driving a [`PageSource`].
//!
//! Loads are pull-based: the UI asks for the next (or previous) page once it
//! has seen the current boundary, and at most one load runs at a time. Every
//! `refresh` or `close` bumps the session generation; a load that completes
//! under an older generation is dropped instead of being applied.

use futures::Stream;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio_stream::wrappers::WatchStream;

use super::page_source::{FetchPage, LoadParams, LoadResult, Page, PageSource, PagingState};
use crate::modules::catalog::domain::entities::Movie;
use crate::shared::errors::AppError;

/// TMDB serves fixed-size pages, so the first load asks for one page like
/// every later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub page_size: u32,
}

impl PagingConfig {
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self::new(crate::shared::config::DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    NotLoading { end_of_pagination_reached: bool },
    Loading,
    Error(AppError),
}

impl LoadState {
    pub fn idle() -> Self {
        LoadState::NotLoading {
            end_of_pagination_reached: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_end(&self) -> bool {
        matches!(
            self,
            LoadState::NotLoading {
                end_of_pagination_reached: true
            }
        )
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            LoadState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Snapshot of everything loaded so far in one session.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingData {
    pub pages: Vec<Page>,
    /// Initial load; an error here is a screen-level failure.
    pub refresh: LoadState,
    pub prepend: LoadState,
    /// Loading further pages; an error here keeps the loaded pages.
    pub append: LoadState,
}

impl Default for PagingData {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            refresh: LoadState::idle(),
            prepend: LoadState::idle(),
            append: LoadState::idle(),
        }
    }
}

impl PagingData {
    /// All loaded movies in page order.
    pub fn items(&self) -> Vec<Movie> {
        self.pages
            .iter()
            .flat_map(|page| page.data.iter().cloned())
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.data.len()).sum()
    }

    pub fn map_items(&self, f: impl Fn(&Movie) -> Movie) -> Self {
        Self {
            pages: self
                .pages
                .iter()
                .map(|page| Page {
                    data: page.data.iter().map(&f).collect(),
                    ..page.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Append,
    Prepend,
}

pub struct Pager {
    source: PageSource,
    config: PagingConfig,
    data: watch::Sender<PagingData>,
    generation: AtomicU64,
    closed: AtomicBool,
    anchor: Mutex<Option<usize>>,
    in_flight: AsyncMutex<()>,
}

impl Pager {
    pub fn new(config: PagingConfig, fetch: FetchPage) -> Self {
        let (total_results, _) = watch::channel(0);
        let (data, _) = watch::channel(PagingData::default());
        Self {
            source: PageSource::new(fetch, Arc::new(total_results)),
            config,
            data,
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            anchor: Mutex::new(None),
            in_flight: AsyncMutex::new(()),
        }
    }

    pub fn snapshot(&self) -> PagingData {
        self.data.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PagingData> {
        self.data.subscribe()
    }

    /// Current snapshot, then every change.
    pub fn stream(&self) -> impl Stream<Item = PagingData> + Send + 'static {
        WatchStream::new(self.data.subscribe())
    }

    /// Total result count reported by page 1 of this session.
    pub fn total_results(&self) -> watch::Receiver<u32> {
        self.source.total_results()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Records the last item position the UI displayed; used by `refresh`.
    pub fn set_anchor(&self, position: usize) {
        if let Ok(mut anchor) = self.anchor.lock() {
            *anchor = Some(position);
        }
    }

    /// Drops loaded pages and reloads around the anchor (page 1 without one).
    /// Any load still in flight is discarded when it completes.
    pub async fn refresh(&self) {
        if self.is_closed() {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = self.in_flight.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        let state = PagingState {
            pages: self.data.borrow().pages.clone(),
            anchor_position: self.anchor.lock().ok().and_then(|anchor| *anchor),
        };
        let key = PageSource::refresh_key(&state);

        self.data.send_replace(PagingData {
            refresh: LoadState::Loading,
            ..PagingData::default()
        });

        let result = self
            .source
            .load(LoadParams {
                key,
                load_size: self.config.page_size,
            })
            .await;

        if !self.is_current(generation) {
            tracing::debug!(generation, "discarding stale refresh");
            return;
        }

        self.data.send_modify(|data| match result {
            LoadResult::Page(page) => {
                data.refresh = LoadState::idle();
                data.append = LoadState::NotLoading {
                    end_of_pagination_reached: page.next_key.is_none(),
                };
                data.prepend = LoadState::NotLoading {
                    end_of_pagination_reached: page.prev_key.is_none(),
                };
                data.pages = vec![page];
            }
            LoadResult::Error(e) => data.refresh = LoadState::Error(e),
        });
    }

    /// Loads the page after the last loaded one. Ignored while another load
    /// runs, after the end was reached, or before the first page exists.
    pub async fn load_next(&self) {
        self.load(Direction::Append).await;
    }

    /// Loads the page before the first loaded one.
    pub async fn load_previous(&self) {
        self.load(Direction::Prepend).await;
    }

    /// Re-attempts whichever load failed, keeping everything already loaded.
    pub async fn retry(&self) {
        let data = self.snapshot();
        if data.refresh.error().is_some() || data.pages.is_empty() {
            self.refresh().await;
        } else if data.append.error().is_some() {
            self.load_next().await;
        } else if data.prepend.error().is_some() {
            self.load_previous().await;
        }
    }

    /// Ends the session; in-flight results are dropped and further loads ignored.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.is_closed() && self.generation.load(Ordering::SeqCst) == generation
    }

    async fn load(&self, direction: Direction) {
        if self.is_closed() {
            return;
        }
        let Ok(_guard) = self.in_flight.try_lock() else {
            return;
        };
        let generation = self.generation.load(Ordering::SeqCst);

        let key = {
            let data = self.data.borrow();
            let (state, boundary) = match direction {
                Direction::Append => (&data.append, data.pages.last().map(|p| p.next_key)),
                Direction::Prepend => (&data.prepend, data.pages.first().map(|p| p.prev_key)),
            };
            if state.is_loading() || state.is_end() {
                return;
            }
            match boundary {
                Some(Some(key)) => key,
                _ => return,
            }
        };

        self.data.send_modify(|data| match direction {
            Direction::Append => data.append = LoadState::Loading,
            Direction::Prepend => data.prepend = LoadState::Loading,
        });

        let result = self
            .source
            .load(LoadParams {
                key: Some(key),
                load_size: self.config.page_size,
            })
            .await;

        if !self.is_current(generation) {
            tracing::debug!(generation, page = key, "discarding stale page");
            return;
        }

        self.data.send_modify(|data| {
            let state = match result {
                LoadResult::Page(page) => match direction {
                    Direction::Append => {
                        let end = page.next_key.is_none();
                        data.pages.push(page);
                        LoadState::NotLoading {
                            end_of_pagination_reached: end,
                        }
                    }
                    Direction::Prepend => {
                        let end = page.prev_key.is_none();
                        data.pages.insert(0, page);
                        LoadState::NotLoading {
                            end_of_pagination_reached: end,
                        }
                    }
                },
                LoadResult::Error(e) => LoadState::Error(e),
            };
            match direction {
                Direction::Append => data.append = state,
                Direction::Prepend => data.prepend = state,
            }
        });
    }
}

impl Drop for Pager {
    fn drop(&mut self) {
        self.close();
    }
}
