//! Core types for geostuff
//!
//! Domain types shared by the storage, service, and HTTP crates.

mod city;
mod constants;
mod env_config;
mod error;
mod geo;

pub use city::*;
pub use constants::*;
pub use env_config::{database_url, env_parse_with_default};
pub use error::*;
pub use geo::*;
