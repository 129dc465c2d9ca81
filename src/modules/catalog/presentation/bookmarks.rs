use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::modules::catalog::application::use_cases::{
    GetBookmarkedMoviesUseCase, ToggleBookmarkUseCase,
};
use crate::modules::catalog::domain::entities::Movie;
use crate::shared::application::{
    send_unless_cancelled, JobSlot, UiEvent, UiEvents, UiState, UseCase, ViewModelScope,
    FAILED_BOOKMARK_MESSAGE,
};

#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkIntent {
    LoadBookmarks,
    BookmarkMovie(Movie),
}

pub struct BookmarkViewModel {
    get_bookmarked_movies: Arc<GetBookmarkedMoviesUseCase>,
    toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    state: Arc<watch::Sender<UiState<Vec<Movie>>>>,
    events: UiEvents,
    subscription: JobSlot,
    scope: ViewModelScope,
}

impl BookmarkViewModel {
    pub fn new(
        get_bookmarked_movies: Arc<GetBookmarkedMoviesUseCase>,
        toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            get_bookmarked_movies,
            toggle_bookmark,
            state: Arc::new(state),
            events: UiEvents::new(),
            subscription: JobSlot::new(),
            scope: ViewModelScope::new(),
        }
    }

    pub fn state(&self) -> watch::Receiver<UiState<Vec<Movie>>> {
        self.state.subscribe()
    }

    pub fn events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.events.take_receiver()
    }

    pub fn handle_intent(&self, intent: BookmarkIntent) {
        match intent {
            BookmarkIntent::LoadBookmarks => {
                self.subscription.cancel();
                self.state.send_replace(UiState::Loading);
                let mut bookmarks = self.get_bookmarked_movies.invoke();
                let state = Arc::clone(&self.state);
                let job = self.scope.launch_job(move |job| async move {
                    while let Some(update) = bookmarks.next().await {
                        let next = match update {
                            Ok(movies) => UiState::Success(movies),
                            Err(e) => UiState::Error(e.user_message()),
                        };
                        send_unless_cancelled(&*state, &job, |state| *state = next);
                    }
                });
                self.subscription.replace(job);
            }
            BookmarkIntent::BookmarkMovie(movie) => {
                let toggle_bookmark = Arc::clone(&self.toggle_bookmark);
                let events = self.events.sender();
                self.scope.launch(async move {
                    if let Err(e) = toggle_bookmark.execute(movie).await {
                        log::warn!("Bookmark toggle failed: {}", e);
                        let _ =
                            events.send(UiEvent::ShowToast(FAILED_BOOKMARK_MESSAGE.to_string()));
                    }
                });
            }
        }
    }

    pub fn close(&self) {
        self.subscription.cancel();
        self.scope.close();
    }
}
