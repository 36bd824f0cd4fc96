//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, Environment, LogFormat, LoggingConfig, ServerConfig, StorageBackend, StorageConfig,
};
