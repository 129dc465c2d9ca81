pub mod bookmark_store;
pub mod mapper;
pub mod models;
pub mod sqlite_bookmark_store;

pub use bookmark_store::{BookmarkEntityStream, BookmarkStore};
#[cfg(test)]
pub use bookmark_store::MockBookmarkStore;
pub use mapper::BookmarkMapper;
pub use models::BookmarkEntity;
pub use sqlite_bookmark_store::SqliteBookmarkStore;
