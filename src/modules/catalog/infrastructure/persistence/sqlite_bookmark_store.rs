use async_trait::async_trait;
use diesel::prelude::*;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::bookmark_store::{BookmarkEntityStream, BookmarkStore};
use super::models::BookmarkEntity;
use crate::schema::bookmarks;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, Stopwatch};
use crate::shared::Database;

/// Diesel-backed bookmark table with live queries.
///
/// Every successful mutation bumps a change counter; observers re-read the
/// table whenever the counter moves.
pub struct SqliteBookmarkStore {
    db: Arc<Database>,
    changes: watch::Sender<u64>,
}

impl SqliteBookmarkStore {
    pub fn new(db: Arc<Database>) -> Self {
        let (changes, _) = watch::channel(0);
        Self { db, changes }
    }

    fn notify_changed(&self) {
        self.changes.send_modify(|version| *version += 1);
    }

    async fn load_all(db: Arc<Database>) -> AppResult<Vec<BookmarkEntity>> {
        db.run(|conn| {
            let rows = bookmarks::table
                .order((bookmarks::bookmarked_at.asc(), bookmarks::id.asc()))
                .select(BookmarkEntity::as_select())
                .load(conn)?;
            Ok(rows)
        })
        .await
    }
}

#[async_trait]
impl BookmarkStore for SqliteBookmarkStore {
    async fn insert(&self, entity: BookmarkEntity) -> AppResult<i64> {
        let timer = Stopwatch::start();
        let movie_id = entity.id;

        let rows = self
            .db
            .run(move |conn| {
                let rows = diesel::replace_into(bookmarks::table)
                    .values(&entity)
                    .execute(conn)?;
                Ok(rows)
            })
            .await?;

        if rows > 0 {
            self.notify_changed();
        }
        LogContext::bookmark_change("insert", movie_id, rows, timer.elapsed_ms());
        Ok(rows as i64)
    }

    async fn delete(&self, entity: BookmarkEntity) -> AppResult<i64> {
        let timer = Stopwatch::start();
        let movie_id = entity.id;

        let rows = self
            .db
            .run(move |conn| {
                let rows = diesel::delete(bookmarks::table.find(entity.id)).execute(conn)?;
                Ok(rows)
            })
            .await?;

        if rows > 0 {
            self.notify_changed();
        }
        LogContext::bookmark_change("delete", movie_id, rows, timer.elapsed_ms());
        Ok(rows as i64)
    }

    fn observe_all(&self) -> BookmarkEntityStream {
        let db = Arc::clone(&self.db);
        WatchStream::new(self.changes.subscribe())
            .then(move |_| Self::load_all(Arc::clone(&db)))
            .boxed()
    }
}
