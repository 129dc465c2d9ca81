use serde::Serialize;

/// Load state of one region of a screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data")]
pub enum UiState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        UiState::Idle
    }
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            UiState::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// One-shot notifications that must not alter screen state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UiEvent {
    ShowToast(String),
}

pub const FAILED_BOOKMARK_MESSAGE: &str = "Failed to update bookmark";
