pub mod models;
pub mod sqlite_settings_repository;

pub use models::UserSettingEntity;
pub use sqlite_settings_repository::{SqliteSettingsRepository, DARK_MODE_KEY};
