use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::modules::settings::domain::SettingsRepository;
use crate::shared::application::ViewModelScope;
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserSettingState {
    pub is_dark_mode: bool,
}

pub struct UserSettingViewModel {
    repository: Arc<dyn SettingsRepository>,
    state: Arc<watch::Sender<UserSettingState>>,
    scope: ViewModelScope,
}

impl UserSettingViewModel {
    /// Starts following the stored preference; needs a Tokio runtime.
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        let (state, _) = watch::channel(UserSettingState::default());
        let state = Arc::new(state);
        let scope = ViewModelScope::new();

        let mut theme = repository.observe_dark_theme();
        let publish = Arc::clone(&state);
        scope.launch(async move {
            while let Some(is_dark_mode) = theme.next().await {
                publish.send_if_modified(|state| {
                    let changed = state.is_dark_mode != is_dark_mode;
                    state.is_dark_mode = is_dark_mode;
                    changed
                });
            }
        });

        Self {
            repository,
            state,
            scope,
        }
    }

    pub fn state(&self) -> watch::Receiver<UserSettingState> {
        self.state.subscribe()
    }

    pub async fn toggle_theme(&self) -> AppResult<()> {
        let enabled = !self.state.borrow().is_dark_mode;
        self.repository.set_dark_theme(enabled).await
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
