//! Debounced, bookmark-aware paged search.
//!
//! Raw query text goes in through [`SearchPipeline::submit`]. A query is
//! acted on only after the input has been quiet for the debounce window and
//! only if it differs from the previous acted-on query. Blank queries reset
//! to [`SearchState::Idle`] without any network traffic. Starting a new
//! search closes the previous session's pager and aborts its task, so only
//! the latest query's pages ever reach the state channel.

use futures::{FutureExt, StreamExt};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::enrichment::BookmarkEnricher;
use super::paging::{FetchPage, LoadState, Pager, PagingConfig, PagingData};
use crate::modules::catalog::domain::repositories::MovieRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading {
        query: String,
    },
    Results {
        query: String,
        data: PagingData,
        total_results: u32,
    },
    /// The first page (or the bookmark read) failed.
    Error {
        query: String,
        error: AppError,
    },
}

impl SearchState {
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Loading { query }
            | SearchState::Results { query, .. }
            | SearchState::Error { query, .. } => Some(query),
        }
    }

    pub fn total_results(&self) -> u32 {
        match self {
            SearchState::Results { total_results, .. } => *total_results,
            _ => 0,
        }
    }
}

/// Serializable summary for logs and shells.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub query: Option<String>,
    pub loaded: usize,
    pub total_results: u32,
}

impl From<&SearchState> for SearchSummary {
    fn from(state: &SearchState) -> Self {
        let loaded = match state {
            SearchState::Results { data, .. } => data.item_count(),
            _ => 0,
        };
        Self {
            query: state.query().map(str::to_string),
            loaded,
            total_results: state.total_results(),
        }
    }
}

struct ActiveSearch {
    pager: Arc<Pager>,
    task: JoinHandle<()>,
}

impl ActiveSearch {
    fn cancel(self) {
        self.pager.close();
        self.task.abort();
    }
}

struct Sessions {
    repository: Arc<dyn MovieRepository>,
    enricher: BookmarkEnricher,
    config: PagingConfig,
    state: watch::Sender<SearchState>,
    active: Mutex<Option<ActiveSearch>>,
    session: AtomicU64,
}

impl Sessions {
    fn cancel_active(&self) {
        let previous = self.active.lock().ok().and_then(|mut active| active.take());
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    fn start(self: &Arc<Self>, query: String) {
        let blank = query.trim().is_empty();

        // The bump happens under the state lock so a superseded session can
        // never publish after the new session's first state.
        let mut session = 0;
        self.state.send_modify(|state| {
            session = self.session.fetch_add(1, Ordering::SeqCst) + 1;
            *state = if blank {
                SearchState::Idle
            } else {
                SearchState::Loading {
                    query: query.clone(),
                }
            };
        });
        self.cancel_active();

        if blank {
            return;
        }

        LogContext::search(&query, None, None);

        let repository = Arc::clone(&self.repository);
        let search_query = query.clone();
        let fetch: FetchPage = Arc::new(move |page, _load_size| {
            let repository = Arc::clone(&repository);
            let query = search_query.clone();
            async move { repository.search(&query, page).await }.boxed()
        });
        let pager = Arc::new(Pager::new(self.config, fetch));

        let sessions = Arc::clone(self);
        let session_pager = Arc::clone(&pager);
        let task = tokio::spawn(async move {
            let total = session_pager.total_results();
            let mut enriched = Box::pin(sessions.enricher.enrich(session_pager.stream()));

            let forward = async {
                while let Some(update) = enriched.next().await {
                    let next = Self::state_for(&query, update, *total.borrow());
                    if !sessions.publish(session, next) {
                        break;
                    }
                }
            };

            tokio::join!(session_pager.refresh(), forward);
        });

        if let Ok(mut active) = self.active.lock() {
            *active = Some(ActiveSearch { pager, task });
        }
    }

    /// Writes `next` only while `session` is still the current one.
    fn publish(&self, session: u64, next: SearchState) -> bool {
        let mut current = true;
        self.state.send_if_modified(|state| {
            current = self.session.load(Ordering::SeqCst) == session;
            if current {
                *state = next;
            }
            current
        });
        current
    }

    fn state_for(query: &str, update: AppResult<PagingData>, total_results: u32) -> SearchState {
        match update {
            Ok(data) => match &data.refresh {
                LoadState::Loading => SearchState::Loading {
                    query: query.to_string(),
                },
                LoadState::Error(error) => SearchState::Error {
                    query: query.to_string(),
                    error: error.clone(),
                },
                LoadState::NotLoading { .. } => SearchState::Results {
                    query: query.to_string(),
                    data,
                    total_results,
                },
            },
            Err(error) => SearchState::Error {
                query: query.to_string(),
                error,
            },
        }
    }

    fn active_pager(&self) -> Option<Arc<Pager>> {
        self.active
            .lock()
            .ok()
            .and_then(|active| active.as_ref().map(|search| Arc::clone(&search.pager)))
    }
}

pub struct SearchPipeline {
    queries: mpsc::UnboundedSender<String>,
    sessions: Arc<Sessions>,
    driver: JoinHandle<()>,
}

impl SearchPipeline {
    /// Spawns the debounce driver; must be called inside a Tokio runtime.
    pub fn new(
        repository: Arc<dyn MovieRepository>,
        enricher: BookmarkEnricher,
        config: PagingConfig,
        debounce: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        let sessions = Arc::new(Sessions {
            repository,
            enricher,
            config,
            state,
            active: Mutex::new(None),
            session: AtomicU64::new(0),
        });

        let (queries, rx) = mpsc::unbounded_channel();
        let driver = tokio::spawn(Self::drive(rx, Arc::clone(&sessions), debounce));

        Self {
            queries,
            sessions,
            driver,
        }
    }

    /// Feeds one edit of the query text.
    pub fn submit(&self, query: impl Into<String>) {
        if self.queries.send(query.into()).is_err() {
            log::warn!("Search pipeline already stopped, query dropped");
        }
    }

    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.sessions.state.subscribe()
    }

    pub fn current(&self) -> SearchState {
        self.sessions.state.borrow().clone()
    }

    /// Next page of the current query, if any.
    pub async fn load_more(&self) {
        if let Some(pager) = self.sessions.active_pager() {
            pager.load_next().await;
        }
    }

    /// Re-attempts the failed page of the current query.
    pub async fn retry(&self) {
        if let Some(pager) = self.sessions.active_pager() {
            pager.retry().await;
        }
    }

    /// Stops the driver and the active session.
    pub fn close(&self) {
        self.driver.abort();
        self.sessions.cancel_active();
    }

    async fn drive(
        mut queries: mpsc::UnboundedReceiver<String>,
        sessions: Arc<Sessions>,
        debounce: Duration,
    ) {
        let mut last_query: Option<String> = None;

        while let Some(mut query) = queries.recv().await {
            let mut input_closed = false;

            // Every new edit restarts the quiet window.
            loop {
                tokio::select! {
                    next = queries.recv() => match next {
                        Some(edit) => query = edit,
                        None => {
                            input_closed = true;
                            break;
                        }
                    },
                    _ = sleep(debounce) => break,
                }
            }

            if last_query.as_deref() != Some(query.as_str()) {
                last_query = Some(query.clone());
                sessions.start(query);
            }

            if input_closed {
                break;
            }
        }
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.close();
    }
}
