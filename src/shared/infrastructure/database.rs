use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY_URL: &str = ":memory:";

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Local SQLite database behind an r2d2 pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(database_url: &str) -> AppResult<Self> {
        if database_url.trim().is_empty() {
            return Err(AppError::DatabaseError(
                "Database URL must not be empty".to_string(),
            ));
        }

        let builder = r2d2::Pool::builder()
            .connection_timeout(Duration::from_secs(10)) // Time to wait for connection from pool
            .connection_customizer(Box::new(SqlitePragmas));

        // Every in-memory connection is a separate database: keep exactly one alive forever.
        let builder = if database_url == IN_MEMORY_URL {
            builder.max_size(1).idle_timeout(None).max_lifetime(None)
        } else {
            builder.max_size(Self::optimal_pool_size())
        };

        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = builder
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!(
            "Database connection pool initialized for '{}' with max_size: {}",
            database_url,
            pool.max_size()
        );

        Ok(Self { pool })
    }

    /// Single-connection in-memory database (useful for testing)
    pub fn in_memory() -> AppResult<Self> {
        let database = Self::new(IN_MEMORY_URL)?;
        database.run_migrations()?;
        Ok(database)
    }

    /// Apply embedded migrations that have not run yet.
    pub fn run_migrations(&self) -> AppResult<()> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        log_info!("Database migrations completed ({} applied)", applied.len());
        Ok(())
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::slow_pool_acquire(duration);
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::failure(&e, "Failed to acquire database connection from pool");
                Err(AppError::from(e))
            }
        }
    }

    /// Run blocking diesel work off the async executor.
    pub async fn run<F, T>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut DbConnection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let database = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = database.get_connection()?;
            work(&mut conn)
        })
        .await?
    }

    fn optimal_pool_size() -> u32 {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        // SQLite serializes writers; a handful of readers is plenty on device.
        std::cmp::min(cpu_count, 4) as u32
    }
}
