/// Isolated on-disk SQLite database per test, removed on drop
///
/// Each database gets a unique file name so tests can run in parallel.
use showcase_lib::shared::{AppConfig, Database};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestDb {
    path: PathBuf,
    database: Arc<Database>,
}

impl TestDb {
    /// Database name format: test_db_{process_id}_{counter}.db
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!(
            "showcase_test_db_{}_{}.db",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        let database = Database::new(path.to_string_lossy().as_ref())
            .expect("Failed to open test database");
        database
            .run_migrations()
            .expect("Unable to migrate the test database");

        Self {
            path,
            database: Arc::new(database),
        }
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }

    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Test configuration pointing at this database
    pub fn config(&self) -> AppConfig {
        AppConfig::for_tests().with_database_url(self.url())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
