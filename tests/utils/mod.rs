#![allow(dead_code)]

pub mod factories;
pub mod fake_catalog_client;
pub mod test_db;

pub use fake_catalog_client::FakeCatalogClient;
pub use test_db::TestDb;
