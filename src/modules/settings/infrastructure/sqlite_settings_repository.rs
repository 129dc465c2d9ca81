use async_trait::async_trait;
use diesel::prelude::*;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::models::UserSettingEntity;
use crate::modules::settings::domain::{SettingsRepository, ThemeStream};
use crate::schema::user_settings;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;

pub const DARK_MODE_KEY: &str = "is_dark_mode";

pub struct SqliteSettingsRepository {
    db: Arc<Database>,
    changes: watch::Sender<u64>,
}

impl SqliteSettingsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        let (changes, _) = watch::channel(0);
        Self { db, changes }
    }

    async fn read_flag(db: Arc<Database>, key: &'static str) -> bool {
        let stored = db
            .run(move |conn| {
                let row = user_settings::table
                    .find(key)
                    .select(UserSettingEntity::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await;

        match stored {
            Ok(row) => row.map(|row| row.as_flag()).unwrap_or(false),
            Err(e) => {
                LogContext::failure(&e, "Failed to read user setting");
                false
            }
        }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    fn observe_dark_theme(&self) -> ThemeStream {
        let db = Arc::clone(&self.db);
        WatchStream::new(self.changes.subscribe())
            .then(move |_| Self::read_flag(Arc::clone(&db), DARK_MODE_KEY))
            .boxed()
    }

    async fn set_dark_theme(&self, enabled: bool) -> AppResult<()> {
        LogContext::setting_change(DARK_MODE_KEY, if enabled { "true" } else { "false" });
        let entity = UserSettingEntity::flag(DARK_MODE_KEY, enabled);

        self.db
            .run(move |conn| {
                diesel::replace_into(user_settings::table)
                    .values(&entity)
                    .execute(conn)?;
                Ok(())
            })
            .await?;

        self.changes.send_modify(|version| *version += 1);
        Ok(())
    }
}
