//! State holders behind each screen. They own no rendering: a shell
//! subscribes to `state()`, drains `events()` and forwards user input as
//! intents.

pub mod bookmarks;
pub mod dashboard;
pub mod detail;
pub mod latest;
pub mod search;

pub use bookmarks::{BookmarkIntent, BookmarkViewModel};
pub use dashboard::{DashboardData, DashboardIntent, DashboardViewModel};
pub use detail::{DetailIntent, DetailViewModel};
pub use latest::{LatestIntent, LatestUiState, LatestViewModel};
pub use search::{SearchIntent, SearchViewModel};
