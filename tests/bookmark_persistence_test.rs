/// Bookmark persistence tests - SQLite-backed store through the container
///
/// Tests cover:
/// - Toggle round trip and live bookmark list
/// - Bookmarks surviving a restart
/// - Enrichment of already loaded pages
mod utils;

use futures::StreamExt;
use showcase_lib::app::AppContainer;
use showcase_lib::modules::catalog::{Movie, MovieId};
use showcase_lib::shared::application::UseCase;
use showcase_lib::shared::AppError;
use std::sync::Arc;
use utils::{FakeCatalogClient, TestDb};

fn container(test_db: &TestDb, client: Arc<FakeCatalogClient>) -> AppContainer {
    AppContainer::build_with_client(test_db.config(), client).expect("container should build")
}

async fn first_top_movie(container: &AppContainer) -> Movie {
    container
        .get_top_movies
        .execute(1)
        .await
        .unwrap()
        .results
        .into_iter()
        .next()
        .unwrap()
}

#[tokio::test]
async fn toggle_bookmark_round_trip() {
    let test_db = TestDb::new();
    let container = container(&test_db, Arc::new(FakeCatalogClient::new(45, 20)));
    let mut bookmarks = container.get_bookmarked_movies.invoke();
    assert_eq!(bookmarks.next().await, Some(Ok(Vec::new())));

    let movie = first_top_movie(&container).await;
    assert_eq!(movie.genres, Some(vec!["Action".to_string()]));
    container.toggle_bookmark.execute(movie.clone()).await.unwrap();

    let stored = bookmarks.next().await.unwrap().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, movie.id);
    assert!(stored[0].is_bookmarked);
    assert_eq!(stored[0].poster_path, movie.poster_path);
    // Genre names are not persisted.
    assert_eq!(stored[0].genres, None);

    container
        .toggle_bookmark
        .execute(stored[0].clone())
        .await
        .unwrap();
    assert_eq!(bookmarks.next().await, Some(Ok(Vec::new())));
}

#[tokio::test]
async fn bookmarks_survive_restart() {
    let test_db = TestDb::new();
    let client = Arc::new(FakeCatalogClient::new(45, 20));
    {
        let container = container(&test_db, client.clone());
        let movie = first_top_movie(&container).await;
        container.movies.add_bookmark(&movie).await.unwrap();
    }

    let reopened = container(&test_db, client);
    let stored = reopened
        .get_bookmarked_movies
        .invoke()
        .next()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        stored.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![MovieId(1)]
    );
}

#[tokio::test]
async fn removing_unknown_bookmark_fails() {
    let test_db = TestDb::new();
    let container = container(&test_db, Arc::new(FakeCatalogClient::new(45, 20)));
    let movie = first_top_movie(&container).await.with_bookmark(true);

    assert_eq!(
        container.toggle_bookmark.execute(movie).await,
        Err(AppError::DatabaseError("Failed to delete movie".to_string()))
    );
}

#[tokio::test]
async fn bookmarks_listed_in_insertion_order() {
    let test_db = TestDb::new();
    let container = container(&test_db, Arc::new(FakeCatalogClient::new(45, 20)));
    let top = container.get_top_movies.execute(1).await.unwrap();

    for index in [4, 0, 2] {
        container.movies.add_bookmark(&top.results[index]).await.unwrap();
        // Distinct millisecond timestamps.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let stored = container
        .get_bookmarked_movies
        .invoke()
        .next()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.iter().map(|m| m.id.0).collect::<Vec<_>>(),
        vec![5, 1, 3]
    );
}
