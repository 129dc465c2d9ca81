use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::catalog::domain::entities::Genre;
use crate::shared::errors::AppResult;

pub type GenreMapping = Arc<HashMap<u32, String>>;

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Structured genre list for filter chips. Failures propagate.
    async fn get_all(&self) -> AppResult<Vec<Genre>>;

    /// Id → name lookup used to decorate movies. Never fails: an unreachable
    /// catalog yields an empty mapping.
    async fn get_mapping(&self) -> GenreMapping;
}
