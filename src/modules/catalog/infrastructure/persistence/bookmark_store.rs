use async_trait::async_trait;
use futures::stream::BoxStream;

use super::models::BookmarkEntity;
use crate::shared::errors::AppResult;

pub type BookmarkEntityStream = BoxStream<'static, AppResult<Vec<BookmarkEntity>>>;

/// Local bookmark table. Mutations report the affected row count; anything
/// below one means nothing was written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn insert(&self, entity: BookmarkEntity) -> AppResult<i64>;

    async fn delete(&self, entity: BookmarkEntity) -> AppResult<i64>;

    /// Current rows first, then a fresh snapshot after every change.
    fn observe_all(&self) -> BookmarkEntityStream;
}
