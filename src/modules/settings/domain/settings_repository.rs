use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::shared::errors::AppResult;

pub type ThemeStream = BoxStream<'static, bool>;

/// Persisted user preferences.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current dark-theme flag, then every change. Unreadable values count as `false`.
    fn observe_dark_theme(&self) -> ThemeStream;

    async fn set_dark_theme(&self, enabled: bool) -> AppResult<()>;
}
