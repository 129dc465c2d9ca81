/// Shared application layer patterns
///
/// This module contains application-level abstractions used across
/// multiple bounded contexts.
pub mod ui_state;
pub mod use_case;
pub mod view_model_scope;

pub use ui_state::{UiEvent, UiState, FAILED_BOOKMARK_MESSAGE};
pub use use_case::UseCase;
pub use view_model_scope::{send_unless_cancelled, JobSlot, UiEvents, ViewModelScope};
