//! Redis key-value store

mod backend;
mod config;

pub use backend::RedisStore;
pub use config::{RedisConfig, DEFAULT_PORT};
