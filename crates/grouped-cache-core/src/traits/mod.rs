//! Core traits for store, id, serialization and metrics seams

mod backend;
mod key;
mod metrics;
mod serializer;
#[cfg(feature = "tracing")]
mod tracing;

pub use backend::KeyValueStore;
pub use key::{IdGenerator, SchemaIdGenerator, CATALOG_SEGMENT};
pub use metrics::{CacheMetrics, CacheOperation, NoopMetrics};
pub use serializer::{JsonSerializer, Serializer};

#[cfg(feature = "metrics")]
pub use metrics::MetricsCrateAdapter;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingMetrics;

#[cfg(feature = "msgpack")]
pub use serializer::MsgPackSerializer;

#[cfg(feature = "bincode")]
pub use serializer::BincodeSerializer;
