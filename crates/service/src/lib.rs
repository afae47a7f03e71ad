//! Service layer for geostuff
//!
//! Sits between the HTTP/CLI front ends and the `CityStore` backend.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod city_service;
mod error;

pub use city_service::CityService;
pub use error::ServiceError;
