/// Paged feed tests - pager, page source and enrichment together
///
/// Tests cover:
/// - Scrolling to the end without gaps or duplicates
/// - Append failures keeping loaded pages, then retry
/// - Bookmark changes re-annotating loaded pages without refetching
mod utils;

use futures::StreamExt;
use showcase_lib::app::AppContainer;
use showcase_lib::modules::catalog::application::{LoadState, PagingData};
use showcase_lib::modules::catalog::infrastructure::http_client::{ApiResponse, TransportError};
use showcase_lib::modules::catalog::Genre;
use showcase_lib::shared::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use utils::{FakeCatalogClient, TestDb};

async fn next_settled<S>(movies: &mut S) -> PagingData
where
    S: futures::Stream<Item = Result<PagingData, AppError>> + Unpin,
{
    loop {
        let data = movies.next().await.unwrap().unwrap();
        if !data.refresh.is_loading() && !data.append.is_loading() && !data.pages.is_empty() {
            return data;
        }
    }
}

#[tokio::test]
async fn scrolls_whole_catalog_in_order() {
    let test_db = TestDb::new();
    let client = Arc::new(FakeCatalogClient::new(95, 20));
    let container =
        AppContainer::build_with_client(test_db.config().with_page_size(20), client.clone())
            .unwrap();

    let feed = container.get_latest_movies.invoke(None);
    feed.pager.refresh().await;
    while !feed.pager.snapshot().append.is_end() {
        feed.pager.load_next().await;
    }

    let items = feed.pager.snapshot().items();
    let ids: Vec<i64> = items.iter().map(|m| m.id.0).collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();

    assert_eq!(ids, (1..=95).collect::<Vec<_>>());
    assert_eq!(unique.len(), 95);
    assert_eq!(*feed.total_results.borrow(), 95);
    assert_eq!(
        client.calls().iter().filter(|c| c.starts_with("discover")).count(),
        5
    );
}

#[tokio::test]
async fn append_failure_keeps_pages_until_retry() {
    let test_db = TestDb::new();
    let client = Arc::new(FakeCatalogClient::new(60, 20));
    let container = AppContainer::build_with_client(test_db.config(), client.clone()).unwrap();
    client.fail_page(2, Err(TransportError::Timeout));

    let feed = container
        .get_latest_movies
        .invoke(Some(Genre::new(28, "Action")));
    feed.pager.refresh().await;
    feed.pager.load_next().await;

    let failed = feed.pager.snapshot();
    assert_eq!(failed.item_count(), 20);
    assert!(matches!(
        failed.append,
        LoadState::Error(AppError::NetworkUnavailable(_))
    ));
    assert_eq!(failed.refresh, LoadState::idle());

    client.heal_page(2);
    feed.pager.retry().await;

    let recovered = feed.pager.snapshot();
    assert_eq!(recovered.item_count(), 40);
    assert_eq!(*feed.total_results.borrow(), 60);
}

#[tokio::test]
async fn initial_failure_is_refresh_error() {
    let test_db = TestDb::new();
    let client = Arc::new(FakeCatalogClient::new(60, 20));
    let container = AppContainer::build_with_client(test_db.config(), client.clone()).unwrap();
    client.fail_page(1, Ok(ApiResponse::failure(401, Some("Invalid API key"))));

    let feed = container.get_latest_movies.invoke(None);
    feed.pager.refresh().await;

    let state = feed.pager.snapshot();
    assert!(state.pages.is_empty());
    assert_eq!(
        state.refresh,
        LoadState::Error(AppError::Unauthorized("Invalid API key".to_string()))
    );
}

#[tokio::test]
async fn bookmark_toggle_reannotates_without_refetch() {
    let test_db = TestDb::new();
    let client = Arc::new(FakeCatalogClient::new(60, 20));
    let container = AppContainer::build_with_client(test_db.config(), client.clone()).unwrap();

    let mut feed = container.get_latest_movies.invoke(None);
    feed.pager.refresh().await;
    feed.pager.load_next().await;
    let loaded = next_settled(&mut feed.movies).await;
    assert_eq!(loaded.item_count(), 40);
    let calls_before = client.calls().len();

    let target = loaded.items()[25].clone();
    container.movies.add_bookmark(&target).await.unwrap();
    let updated = next_settled(&mut feed.movies).await;

    let bookmarked: Vec<i64> = updated
        .items()
        .iter()
        .filter(|m| m.is_bookmarked)
        .map(|m| m.id.0)
        .collect();
    assert_eq!(bookmarked, vec![26]);
    assert_eq!(client.calls().len(), calls_before);
}
