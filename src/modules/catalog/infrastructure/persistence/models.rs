use diesel::prelude::*;

use crate::schema::bookmarks;

/// One bookmarked movie as stored on device.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookmarkEntity {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub vote_average: f32,
    pub poster_path: Option<String>,
    pub bookmarked_at: i64,
}
