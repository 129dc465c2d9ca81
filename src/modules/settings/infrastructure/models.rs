use diesel::prelude::*;

use crate::schema::user_settings;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSettingEntity {
    pub key: String,
    pub value: String,
}

impl UserSettingEntity {
    pub fn flag(key: &str, enabled: bool) -> Self {
        Self {
            key: key.to_string(),
            value: enabled.to_string(),
        }
    }

    pub fn as_flag(&self) -> bool {
        self.value.parse().unwrap_or(false)
    }
}
