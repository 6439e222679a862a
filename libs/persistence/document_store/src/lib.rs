//! Durable caches of resolved cities, venues and artist genres.
//!
//! [`DocumentStore`] is the boundary the resolvers talk to. A miss is the
//! explicit [`StoreError::NotFound`] variant so callers can tell "not there"
//! apart from "could not ask".

pub mod config;
mod error;
mod memory;
mod postgres;
mod store;
mod timeout;

pub use config::{PostgresDbConfig, connect_postgres_db};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::DocumentStore;
pub use timeout::{DEFAULT_STORE_TIMEOUT, TimeoutStore};
