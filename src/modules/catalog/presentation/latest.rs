use futures::StreamExt;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::modules::catalog::application::paging::{LoadState, Pager, PagingData};
use crate::modules::catalog::application::use_cases::{
    GetGenresUseCase, GetLatestMoviesUseCase, ToggleBookmarkUseCase,
};
use crate::modules::catalog::domain::entities::{Genre, Movie};
use crate::shared::application::{
    send_unless_cancelled, JobSlot, UiEvent, UiEvents, UiState, UseCase, ViewModelScope,
    FAILED_BOOKMARK_MESSAGE,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LatestUiState {
    pub selected_genre: Option<Genre>,
    pub total_result_count: u32,
    pub genres: UiState<Vec<Genre>>,
    pub movies: UiState<PagingData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LatestIntent {
    LoadGenres,
    LoadLatest(Option<Genre>),
    BookmarkMovie(Movie),
    LoadMore,
    Retry,
}

pub struct LatestViewModel {
    get_latest_movies: Arc<GetLatestMoviesUseCase>,
    get_genres: Arc<GetGenresUseCase>,
    toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    state: Arc<watch::Sender<LatestUiState>>,
    events: UiEvents,
    pager: Mutex<Option<Arc<Pager>>>,
    feed: JobSlot,
    scope: ViewModelScope,
}

impl LatestViewModel {
    pub fn new(
        get_latest_movies: Arc<GetLatestMoviesUseCase>,
        get_genres: Arc<GetGenresUseCase>,
        toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    ) -> Self {
        let (state, _) = watch::channel(LatestUiState::default());
        Self {
            get_latest_movies,
            get_genres,
            toggle_bookmark,
            state: Arc::new(state),
            events: UiEvents::new(),
            pager: Mutex::new(None),
            feed: JobSlot::new(),
            scope: ViewModelScope::new(),
        }
    }

    /// Genre chips plus the unfiltered feed, as the screen shows on entry.
    pub fn open(&self) {
        self.handle_intent(LatestIntent::LoadGenres);
        self.handle_intent(LatestIntent::LoadLatest(Some(Genre::all())));
    }

    pub fn state(&self) -> watch::Receiver<LatestUiState> {
        self.state.subscribe()
    }

    pub fn events(&self) -> Option<tokio::sync::mpsc::UnboundedReceiver<UiEvent>> {
        self.events.take_receiver()
    }

    pub fn handle_intent(&self, intent: LatestIntent) {
        match intent {
            LatestIntent::LoadGenres => self.load_genres(),
            LatestIntent::LoadLatest(genre) => self.load_latest(genre),
            LatestIntent::BookmarkMovie(movie) => self.toggle(movie),
            LatestIntent::LoadMore => {
                if let Some(pager) = self.current_pager() {
                    self.scope.launch(async move { pager.load_next().await });
                }
            }
            LatestIntent::Retry => {
                if let Some(pager) = self.current_pager() {
                    self.scope.launch(async move { pager.retry().await });
                }
            }
        }
    }

    fn load_genres(&self) {
        self.state.send_modify(|state| state.genres = UiState::Loading);
        let get_genres = Arc::clone(&self.get_genres);
        let state = Arc::clone(&self.state);

        self.scope.launch(async move {
            // A failed genre read leaves the chip row empty rather than erroring the screen.
            let genres = get_genres.execute(()).await.unwrap_or_else(|e| {
                log::warn!("Failed to load genres: {}", e);
                Vec::new()
            });
            let chips = if genres.is_empty() {
                genres
            } else {
                std::iter::once(Genre::all()).chain(genres).collect()
            };
            state.send_modify(|state| state.genres = UiState::Success(chips));
        });
    }

    fn load_latest(&self, genre: Option<Genre>) {
        if self.state.borrow().selected_genre == genre {
            return;
        }

        // The old feed is fenced off before the new genre's first write.
        self.feed.cancel();
        let filter = genre.clone().filter(|genre| !genre.is_all());
        let feed = self.get_latest_movies.invoke(filter);
        if let Ok(mut current) = self.pager.lock() {
            if let Some(previous) = current.replace(Arc::clone(&feed.pager)) {
                previous.close();
            }
        }

        self.state.send_modify(|state| {
            state.selected_genre = genre;
            state.total_result_count = 0;
            state.movies = UiState::Loading;
        });

        let state = Arc::clone(&self.state);
        let pager = Arc::clone(&feed.pager);
        let total_results = feed.total_results;
        let mut movies = feed.movies;

        let job = self.scope.launch_job(move |job| async move {
            let forward = async {
                while let Some(update) = movies.next().await {
                    let total = *total_results.borrow();
                    send_unless_cancelled(&*state, &job, |state| match update {
                        Ok(data) => match &data.refresh {
                            LoadState::Loading => state.movies = UiState::Loading,
                            LoadState::Error(e) => {
                                state.movies = UiState::Error(e.user_message())
                            }
                            LoadState::NotLoading { .. } => {
                                state.total_result_count = total;
                                state.movies = UiState::Success(data);
                            }
                        },
                        Err(e) => state.movies = UiState::Error(e.user_message()),
                    });
                }
            };
            tokio::join!(pager.refresh(), forward);
        });
        self.feed.replace(job);
    }

    fn toggle(&self, movie: Movie) {
        let toggle_bookmark = Arc::clone(&self.toggle_bookmark);
        let events = self.events.sender();
        self.scope.launch(async move {
            if let Err(e) = toggle_bookmark.execute(movie).await {
                log::warn!("Bookmark toggle failed: {}", e);
                let _ = events.send(UiEvent::ShowToast(FAILED_BOOKMARK_MESSAGE.to_string()));
            }
        });
    }

    fn current_pager(&self) -> Option<Arc<Pager>> {
        self.pager.lock().ok().and_then(|pager| pager.clone())
    }

    pub fn close(&self) {
        self.feed.cancel();
        if let Some(pager) = self.current_pager() {
            pager.close();
        }
        self.scope.close();
    }
}

impl Drop for LatestViewModel {
    fn drop(&mut self) {
        self.close();
    }
}
