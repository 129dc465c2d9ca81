use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::http_client::CatalogClient;
use crate::modules::catalog::domain::entities::Genre;
use crate::modules::catalog::domain::repositories::{GenreMapping, GenreRepository};
use crate::shared::errors::{AppError, AppResult};

/// Process-lifetime genre cache.
///
/// The id → name mapping is fetched once and then frozen; it is never
/// refreshed, so a taxonomy change on the server shows up only after a
/// restart. Concurrent first callers share one request. A failed fetch is
/// not cached: the caller gets an empty mapping and the next call retries.
pub struct GenreIndex {
    client: Arc<dyn CatalogClient>,
    mapping: OnceCell<GenreMapping>,
}

impl GenreIndex {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            mapping: OnceCell::new(),
        }
    }

    pub fn is_populated(&self) -> bool {
        self.mapping.initialized()
    }

    async fn fetch_genres(&self) -> AppResult<Vec<Genre>> {
        let response = self.client.genres().await.map_err(AppError::from)?;
        let genres = response
            .into_result()?
            .genres
            .into_iter()
            .map(|genre| Genre::new(genre.id, genre.name))
            .collect();
        Ok(genres)
    }

    fn build_mapping(genres: &[Genre]) -> GenreMapping {
        Arc::new(
            genres
                .iter()
                .map(|genre| (genre.id, genre.name.clone()))
                .collect::<HashMap<_, _>>(),
        )
    }
}

#[async_trait]
impl GenreRepository for GenreIndex {
    async fn get_all(&self) -> AppResult<Vec<Genre>> {
        let genres = self.fetch_genres().await?;

        if !self.mapping.initialized() {
            // Loses harmlessly to a concurrent initializer.
            if self.mapping.set(Self::build_mapping(&genres)).is_ok() {
                tracing::debug!(count = genres.len(), "genre mapping seeded from genre list");
            }
        }

        Ok(genres)
    }

    async fn get_mapping(&self) -> GenreMapping {
        let result = self
            .mapping
            .get_or_try_init(|| async {
                let genres = self.fetch_genres().await?;
                tracing::info!(count = genres.len(), "genre mapping cached");
                Ok::<_, AppError>(Self::build_mapping(&genres))
            })
            .await;

        match result {
            Ok(mapping) => Arc::clone(mapping),
            Err(e) => {
                tracing::warn!(error = %e, "genre mapping unavailable, movies stay undecorated");
                Arc::new(HashMap::new())
            }
        }
    }
}
