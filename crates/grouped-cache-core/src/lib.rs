//! grouped-cache-core: Core traits and types for the grouped-cache library
//!
//! This crate holds the seams the provider is built against: the key-value
//! store trait, id generation, serialization, metrics, and the catalog type
//! that indexes group members inside the store.

mod error;
mod traits;
mod types;

pub use error::{CacheError, Result};
pub use traits::*;
pub use types::*;
