pub mod client;
pub mod config;
pub mod routes;
pub mod store;

pub use client::HttpBackend;
pub use config::{ServerConfig, DEFAULT_CONFIG_NAME};
pub use routes::{app, router, ApiError};
pub use store::{ArticleStore, StoreError};
