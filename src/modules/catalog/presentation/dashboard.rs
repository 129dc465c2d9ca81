use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::modules::catalog::application::use_cases::{
    GetSingleLatestMovieUseCase, GetTopMoviesUseCase,
};
use crate::modules::catalog::domain::entities::{Movie, Movies};
use crate::shared::application::{UiState, UseCase, ViewModelScope};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub top_movies: Option<Movies>,
    pub latest_movie: Option<Movie>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    LoadAllMovies,
}

pub struct DashboardViewModel {
    get_top_movies: Arc<GetTopMoviesUseCase>,
    get_latest_movie: Arc<GetSingleLatestMovieUseCase>,
    state: Arc<watch::Sender<UiState<DashboardData>>>,
    scope: ViewModelScope,
}

impl DashboardViewModel {
    pub fn new(
        get_top_movies: Arc<GetTopMoviesUseCase>,
        get_latest_movie: Arc<GetSingleLatestMovieUseCase>,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            get_top_movies,
            get_latest_movie,
            state: Arc::new(state),
            scope: ViewModelScope::new(),
        }
    }

    pub fn state(&self) -> watch::Receiver<UiState<DashboardData>> {
        self.state.subscribe()
    }

    pub fn handle_intent(&self, intent: DashboardIntent) {
        match intent {
            DashboardIntent::LoadAllMovies => {
                self.state.send_replace(UiState::Loading);
                let top = Arc::clone(&self.get_top_movies);
                let latest = Arc::clone(&self.get_latest_movie);
                let state = Arc::clone(&self.state);
                self.scope.launch(async move {
                    state.send_replace(Self::load_all(&top, &latest).await);
                });
            }
        }
    }

    /// Both sections load concurrently; the screen fails only when both do.
    async fn load_all(
        top: &GetTopMoviesUseCase,
        latest: &GetSingleLatestMovieUseCase,
    ) -> UiState<DashboardData> {
        let (top_movies, latest_movie) = tokio::join!(top.execute(1), latest.execute(()));

        match (top_movies, latest_movie) {
            (Err(top_error), Err(latest_error)) => {
                log::warn!(
                    "Dashboard failed to load (top: {}, latest: {})",
                    top_error,
                    latest_error
                );
                UiState::Error(top_error.user_message())
            }
            (top_movies, latest_movie) => UiState::Success(DashboardData {
                top_movies: top_movies.ok(),
                latest_movie: latest_movie.ok().flatten(),
            }),
        }
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
