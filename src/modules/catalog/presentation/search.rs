use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::modules::catalog::application::search_pipeline::{SearchPipeline, SearchState};
use crate::modules::catalog::application::use_cases::ToggleBookmarkUseCase;
use crate::modules::catalog::domain::entities::Movie;
use crate::shared::application::{
    UiEvent, UiEvents, UseCase, ViewModelScope, FAILED_BOOKMARK_MESSAGE,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    Search(String),
    BookmarkMovie(Movie),
    LoadMore,
    Retry,
}

pub struct SearchViewModel {
    pipeline: Arc<SearchPipeline>,
    toggle_bookmark: Arc<ToggleBookmarkUseCase>,
    query: watch::Sender<String>,
    events: UiEvents,
    scope: ViewModelScope,
}

impl SearchViewModel {
    pub fn new(pipeline: SearchPipeline, toggle_bookmark: Arc<ToggleBookmarkUseCase>) -> Self {
        let (query, _) = watch::channel(String::new());
        Self {
            pipeline: Arc::new(pipeline),
            toggle_bookmark,
            query,
            events: UiEvents::new(),
            scope: ViewModelScope::new(),
        }
    }

    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.pipeline.state()
    }

    /// The text field contents, undebounced.
    pub fn query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }

    pub fn events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.events.take_receiver()
    }

    pub fn handle_intent(&self, intent: SearchIntent) {
        match intent {
            SearchIntent::Search(query) => {
                self.query.send_replace(query.clone());
                self.pipeline.submit(query);
            }
            SearchIntent::BookmarkMovie(movie) => {
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
            SearchIntent::LoadMore => {
                let pipeline = Arc::clone(&self.pipeline);
                self.scope.launch(async move { pipeline.load_more().await });
            }
            SearchIntent::Retry => {
                let pipeline = Arc::clone(&self.pipeline);
                self.scope.launch(async move { pipeline.retry().await });
            }
        }
    }

    pub fn close(&self) {
        self.scope.close();
        self.pipeline.close();
    }
}
