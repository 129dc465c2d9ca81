use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::modules::catalog::application::use_cases::{GetMovieDetailUseCase, ToggleBookmarkUseCase};
use crate::modules::catalog::domain::entities::{Movie, MovieId};
use crate::shared::application::{
    send_unless_cancelled, JobSlot, UiEvent, UiEvents, UiState, UseCase, ViewModelScope,
    FAILED_BOOKMARK_MESSAGE,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailIntent {
    LoadDetail(MovieId),
    ToggleBookmark(Movie),
}

pub struct DetailViewModel {
    get_movie_detail: Arc<GetMovieDetailUseCase>,
    toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    state: Arc<watch::Sender<UiState<Movie>>>,
    events: UiEvents,
    detail: JobSlot,
    scope: ViewModelScope,
}

impl DetailViewModel {
    pub fn new(
        get_movie_detail: Arc<GetMovieDetailUseCase>,
        toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            get_movie_detail,
            toggle_bookmark,
            state: Arc::new(state),
            events: UiEvents::new(),
            detail: JobSlot::new(),
            scope: ViewModelScope::new(),
        }
    }

    pub fn state(&self) -> watch::Receiver<UiState<Movie>> {
        self.state.subscribe()
    }

    pub fn events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.events.take_receiver()
    }

    pub fn handle_intent(&self, intent: DetailIntent) {
        match intent {
            DetailIntent::LoadDetail(movie_id) => {
                self.detail.cancel();
                self.state.send_replace(UiState::Loading);
                let get_movie_detail = Arc::clone(&self.get_movie_detail);
                let state = Arc::clone(&self.state);
                let job = self.scope.launch_job(move |job| async move {
                    let mut detail = get_movie_detail.invoke(movie_id).await;
                    while let Some(update) = detail.next().await {
                        let next = match update {
                            Ok(movie) => UiState::Success(movie),
                            Err(e) => UiState::Error(e.user_message()),
                        };
                        send_unless_cancelled(&*state, &job, |state| *state = next);
                    }
                });
                self.detail.replace(job);
            }
            DetailIntent::ToggleBookmark(movie) => {
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
        self.detail.cancel();
        self.scope.close();
    }
}
