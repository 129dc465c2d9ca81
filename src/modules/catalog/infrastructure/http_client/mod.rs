pub mod catalog_client;
pub mod rate_limit_client;
pub mod retry_policy;

pub use catalog_client::{ApiResponse, CatalogClient, TransportError, TransportResult};
pub use rate_limit_client::TmdbClient;
pub use retry_policy::RetryPolicy;
