pub mod app;
pub mod modules;
mod schema;
pub mod shared;

use std::time::Duration;

use app::AppContainer;
use modules::catalog::application::{search_pipeline::SearchSummary, DEFAULT_RANDOM_COUNT};
use modules::catalog::presentation::{DashboardData, DashboardIntent};
use shared::application::UiState;
use shared::utils::logger::init_logger;
use shared::AppConfig;

const DASHBOARD_TIMEOUT: Duration = Duration::from_secs(60);

/// Loads configuration, wires the application and prints the dashboard.
pub async fn run() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env()?;
    let container = AppContainer::build(config)?;

    let dashboard = container.dashboard_view_model();
    let mut state = dashboard.state();
    dashboard.handle_intent(DashboardIntent::LoadAllMovies);

    let settled = tokio::time::timeout(
        DASHBOARD_TIMEOUT,
        state.wait_for(|s| matches!(s, UiState::Success(_) | UiState::Error(_))),
    )
    .await??
    .clone();
    dashboard.close();

    match settled {
        UiState::Success(data) => print_dashboard(&data),
        UiState::Error(message) => anyhow::bail!("Dashboard failed to load: {}", message),
        _ => {}
    }

    let mut random = container
        .get_random_top_movies
        .invoke(DEFAULT_RANDOM_COUNT)
        .await;
    if let Some(Ok(picks)) = futures::StreamExt::next(&mut random).await {
        println!("\nRandom picks:");
        for movie in picks.results.iter().take(5) {
            println!("  {:>4.1}  {}", movie.vote_average, movie.title);
        }
    }

    if let Some(query) = std::env::args().nth(1) {
        search_once(&container, &query).await?;
    }

    Ok(())
}

fn print_dashboard(data: &DashboardData) {
    if let Some(latest) = &data.latest_movie {
        println!("Latest release: {}", latest.title);
    }
    if let Some(top) = &data.top_movies {
        println!(
            "\nTop rated (page {} of {}, {} movies):",
            top.page, top.total_pages, top.total_results_count
        );
        for movie in &top.results {
            let marker = if movie.is_bookmarked { "*" } else { " " };
            println!("{} {:>4.1}  {}", marker, movie.vote_average, movie.title);
        }
    }
}

async fn search_once(container: &AppContainer, query: &str) -> anyhow::Result<()> {
    use modules::catalog::application::SearchState;
    use modules::catalog::presentation::SearchIntent;

    let search = container.search_view_model();
    let mut state = search.state();
    search.handle_intent(SearchIntent::Search(query.to_string()));

    let settled = tokio::time::timeout(
        DASHBOARD_TIMEOUT,
        state.wait_for(|s| matches!(s, SearchState::Results { .. } | SearchState::Error { .. })),
    )
    .await??
    .clone();
    search.close();

    println!("\nSearch: {}", serde_json::to_string(&SearchSummary::from(&settled))?);
    if let SearchState::Results { data, .. } = &settled {
        for movie in data.items().iter().take(10) {
            println!("  {}", movie.title);
        }
    }
    Ok(())
}
