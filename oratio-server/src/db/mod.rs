//! Database layer: pool construction, schema, supervised connection, and
//! the Postgres-backed record store.
//!
//! Uniqueness and counter updates rely on engine constraints rather than
//! check-then-act sequences; the supervisor keeps connecting in the
//! background instead of failing startup.

pub mod pool;
pub mod store;
pub mod supervisor;

pub use pool::{create_pool, ensure_schema};
pub use store::PgStore;
pub use supervisor::{always_connected, spawn_supervisor, ConnectionState, RetryPolicy};
