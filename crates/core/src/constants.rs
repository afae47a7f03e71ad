//! Shared constants for geostuff.

/// Connection string used when neither `--database-url` nor `DATABASE_URL` is given.
pub const DEFAULT_DATABASE_URL: &str = "postgres:///geostuff";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Width of the `cities.location` column (`VARCHAR(30)`).
pub const MAX_LOCATION_LEN: usize = 30;

/// Mean Earth radius (WGS84) used by `ST_DistanceSphere` for geometries without an SRID.
pub const SPHERE_RADIUS_METERS: f64 = 6_371_008.771_415;

/// Default HTTP port for `geostuff serve`.
pub const DEFAULT_HTTP_PORT: u16 = 5000;
