// src/infrastructure/mod.rs
pub mod config;
pub mod http_client;
pub mod local_storage;
pub mod sqlite;

pub use config::Config;
pub use http_client::HttpApi;
pub use local_storage::{FileStorage, MemoryStorage};
pub use sqlite::SqliteRepository;
