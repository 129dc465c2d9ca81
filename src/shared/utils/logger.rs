use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Calls slower than this are reported at info level.
const SLOW_CALL_MS: u64 = 1_000;

/// Sets up env_logger for the crate and a tracing subscriber for the paging
/// internals. Safe to call more than once.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .filter_module("showcase_lib", log::LevelFilter::Info)
            .filter_module("movie_showcase", log::LevelFilter::Info)
            .filter_module("diesel", log::LevelFilter::Warn)
            .filter_module("reqwest", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .format_target(false)
            .init();

        // env_logger already owns the `log` facade; only the fmt layer can fail here.
        let _ = tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .try_init();

        debug!("Logging initialized");
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

/// Log lines for the catalog, bookmark and settings flows.
pub struct LogContext;

impl LogContext {
    /// One finished catalog request.
    pub fn catalog_call(endpoint: &str, status: u16, attempts: u32, duration_ms: u64) {
        if duration_ms >= SLOW_CALL_MS {
            info!(
                "Catalog {} -> {} after {} attempt(s), slow: {}ms",
                endpoint, status, attempts, duration_ms
            );
        } else {
            debug!(
                "Catalog {} -> {} after {} attempt(s) in {}ms",
                endpoint, status, attempts, duration_ms
            );
        }
    }

    /// A catalog request that will be re-sent.
    pub fn catalog_retry(endpoint: &str, reason: &str, attempt: u32, max_attempts: u32) {
        warn!(
            "Catalog {} {} (attempt {}/{}), retrying",
            endpoint, reason, attempt, max_attempts
        );
    }

    /// Bookmark row written or removed; `rows == 0` means the store did nothing.
    pub fn bookmark_change(action: &str, movie_id: i64, rows: usize, duration_ms: u64) {
        if rows == 0 {
            warn!("Bookmark {} for movie {} affected no rows", action, movie_id);
        } else {
            debug!("Bookmark {} for movie {} in {}ms", action, movie_id, duration_ms);
        }
    }

    pub fn setting_change(key: &str, value: &str) {
        info!("Setting '{}' set to {}", key, value);
    }

    /// A new search session, or one page of it once `results` is known.
    pub fn search(query: &str, page: Option<u32>, results: Option<usize>) {
        match (page, results) {
            (Some(page), Some(results)) => {
                debug!("Search '{}' page {} returned {} movies", query, page, results)
            }
            (Some(page), None) => debug!("Search '{}' fetching page {}", query, page),
            (None, _) => info!("Search session started for '{}'", query),
        }
    }

    pub fn failure(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    pub fn slow_pool_acquire(duration_ms: u64) {
        info!("Waited {}ms for a database connection", duration_ms);
    }
}

/// Wall-clock timer for a single request or query.
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
