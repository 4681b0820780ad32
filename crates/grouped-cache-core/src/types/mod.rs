//! Core types for catalogs, sweeping and connection state

mod catalog;
mod connection;
mod gc;

pub use catalog::{Catalog, MEMBER_MARKER};
pub use connection::ConnectionResult;
pub use gc::{GcPolicy, DEFAULT_SWEEP_PROBABILITY};
