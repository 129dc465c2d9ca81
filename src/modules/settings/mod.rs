pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::SettingsRepository;
pub use infrastructure::SqliteSettingsRepository;
pub use presentation::{UserSettingState, UserSettingViewModel};
