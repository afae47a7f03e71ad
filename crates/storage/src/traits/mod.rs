//! Storage backend trait abstraction
//!
//! Async domain traits implemented by the PostGIS backend (and by the
//! in-memory backend behind the `test-support` feature).

pub mod city;

pub use city::CityStore;
