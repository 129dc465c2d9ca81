use std::sync::Arc;

use crate::modules::catalog::domain::repositories::{BookmarkStream, MovieRepository};

/// Everything the user bookmarked, oldest first, as a live list.
pub struct GetBookmarkedMoviesUseCase {
    repository: Arc<dyn MovieRepository>,
}

impl GetBookmarkedMoviesUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }

    pub fn invoke(&self) -> BookmarkStream {
        self.repository.observe_bookmarks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::application::use_cases::test_repository;
    use crate::modules::catalog::domain::entities::MovieId;
    use crate::modules::catalog::test_support::{movie, FakeCatalogClient};
    use futures::StreamExt;

    #[tokio::test]
    async fn test_lists_bookmarks_as_they_change() {
        let repository = test_repository(Arc::new(FakeCatalogClient::new()));
        let use_case = GetBookmarkedMoviesUseCase::new(repository.clone());

        let mut bookmarks = use_case.invoke();
        assert_eq!(bookmarks.next().await, Some(Ok(Vec::new())));

        repository.add_bookmark(&movie(2)).await.unwrap();
        let listed = bookmarks.next().await.unwrap().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, MovieId(2));
        assert!(listed[0].is_bookmarked);
        assert_eq!(listed[0].genres, None);
    }
}
