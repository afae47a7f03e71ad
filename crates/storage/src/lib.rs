//! Storage layer for geostuff
//!
//! PostgreSQL + PostGIS storage for the `cities` table. Radius queries are
//! answered by `ST_DistanceSphere` inside the database.

mod error;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::{PgStorage, PoolSettings};
pub use traits::CityStore;
