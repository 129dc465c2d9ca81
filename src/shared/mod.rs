// Shared kernel used by every module: errors, configuration, logging,
// database access and the small stream toolkit the pipelines are built on.

pub mod application; // Use case trait and UI state wrappers
pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod infrastructure; // Database pool and migrations
pub mod utils; // Logging and stream operators

// Re-exports for convenience
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
pub use infrastructure::database::Database;
