//! Composition root: builds every long-lived service once and hands out
//! view-models wired to them.

use std::sync::Arc;

use crate::modules::catalog::application::{
    BookmarkEnricher, GetBookmarkedMoviesUseCase, GetGenresUseCase, GetLatestMoviesUseCase,
    GetMovieDetailUseCase, GetRandomTopMoviesUseCase, GetSingleLatestMovieUseCase,
    GetTopMoviesUseCase, PagingConfig, SearchPipeline, ToggleBookmarkUseCase,
};
use crate::modules::catalog::domain::{GenreRepository, MovieRepository};
use crate::modules::catalog::infrastructure::{
    BookmarkStore, CatalogClient, GenreIndex, MovieRepositoryImpl, SqliteBookmarkStore, TmdbClient,
};
use crate::modules::catalog::presentation::{
    BookmarkViewModel, DashboardViewModel, DetailViewModel, LatestViewModel, SearchViewModel,
};
use crate::modules::settings::{SettingsRepository, SqliteSettingsRepository, UserSettingViewModel};
use crate::shared::errors::AppResult;
use crate::shared::{AppConfig, Database};

pub struct AppContainer {
    config: AppConfig,
    pub database: Arc<Database>,
    pub genres: Arc<GenreIndex>,
    pub movies: Arc<dyn MovieRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub enricher: BookmarkEnricher,
    pub get_top_movies: Arc<GetTopMoviesUseCase>,
    pub get_latest_movies: Arc<GetLatestMoviesUseCase>,
    pub get_single_latest_movie: Arc<GetSingleLatestMovieUseCase>,
    pub get_random_top_movies: Arc<GetRandomTopMoviesUseCase>,
    pub get_movie_detail: Arc<GetMovieDetailUseCase>,
    pub get_bookmarked_movies: Arc<GetBookmarkedMoviesUseCase>,
    pub get_genres: Arc<GetGenresUseCase>,
    pub toggle_bookmark: Arc<ToggleBookmarkUseCase>,
}

impl AppContainer {
    /// Opens the database, applies migrations and talks to the configured TMDB endpoint.
    pub fn build(config: AppConfig) -> AppResult<Self> {
        let client: Arc<dyn CatalogClient> = Arc::new(TmdbClient::new(&config)?);
        Self::build_with_client(config, client)
    }

    /// Same wiring with a caller-supplied catalog client.
    pub fn build_with_client(config: AppConfig, client: Arc<dyn CatalogClient>) -> AppResult<Self> {
        // Initialize database and schema
        let database = Arc::new(Database::new(&config.database_url)?);
        database.run_migrations()?;

        // Genre cache lives as long as the container
        let genres = Arc::new(GenreIndex::new(Arc::clone(&client)));
        let genre_repository: Arc<dyn GenreRepository> = genres.clone();

        // Initialize repositories
        let bookmark_store: Arc<dyn BookmarkStore> =
            Arc::new(SqliteBookmarkStore::new(Arc::clone(&database)));
        let movies: Arc<dyn MovieRepository> = Arc::new(MovieRepositoryImpl::new(
            client,
            Arc::clone(&genre_repository),
            bookmark_store,
            &config.image_base_url,
        ));
        let settings: Arc<dyn SettingsRepository> =
            Arc::new(SqliteSettingsRepository::new(Arc::clone(&database)));

        // Initialize use cases
        let enricher = BookmarkEnricher::new(Arc::clone(&movies));
        let paging = PagingConfig::new(config.page_size);

        let container = Self {
            get_top_movies: Arc::new(GetTopMoviesUseCase::new(
                Arc::clone(&movies),
                enricher.clone(),
            )),
            get_latest_movies: Arc::new(GetLatestMoviesUseCase::new(
                Arc::clone(&movies),
                enricher.clone(),
                paging,
            )),
            get_single_latest_movie: Arc::new(GetSingleLatestMovieUseCase::new(Arc::clone(
                &movies,
            ))),
            get_random_top_movies: Arc::new(GetRandomTopMoviesUseCase::new(
                Arc::clone(&movies),
                enricher.clone(),
            )),
            get_movie_detail: Arc::new(GetMovieDetailUseCase::new(
                Arc::clone(&movies),
                enricher.clone(),
            )),
            get_bookmarked_movies: Arc::new(GetBookmarkedMoviesUseCase::new(Arc::clone(&movies))),
            get_genres: Arc::new(GetGenresUseCase::new(genre_repository)),
            toggle_bookmark: Arc::new(ToggleBookmarkUseCase::new(Arc::clone(&movies))),
            config,
            database,
            genres,
            movies,
            settings,
            enricher,
        };

        log::info!("Application container initialized");
        Ok(container)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn dashboard_view_model(&self) -> DashboardViewModel {
        DashboardViewModel::new(
            Arc::clone(&self.get_top_movies),
            Arc::clone(&self.get_single_latest_movie),
        )
    }

    pub fn latest_view_model(&self) -> LatestViewModel {
        LatestViewModel::new(
            Arc::clone(&self.get_latest_movies),
            Arc::clone(&self.get_genres),
            Arc::clone(&self.toggle_bookmark),
        )
    }

    /// Needs a Tokio runtime: the search pipeline spawns its debounce task.
    pub fn search_view_model(&self) -> SearchViewModel {
        let pipeline = SearchPipeline::new(
            Arc::clone(&self.movies),
            self.enricher.clone(),
            PagingConfig::new(self.config.page_size),
            self.config.search_debounce,
        );
        SearchViewModel::new(pipeline, Arc::clone(&self.toggle_bookmark))
    }

    pub fn detail_view_model(&self) -> DetailViewModel {
        DetailViewModel::new(
            Arc::clone(&self.get_movie_detail),
            Arc::clone(&self.toggle_bookmark),
        )
    }

    pub fn bookmark_view_model(&self) -> BookmarkViewModel {
        BookmarkViewModel::new(
            Arc::clone(&self.get_bookmarked_movies),
            Arc::clone(&self.toggle_bookmark),
        )
    }

    pub fn user_setting_view_model(&self) -> UserSettingViewModel {
        UserSettingViewModel::new(Arc::clone(&self.settings))
    }
}
