//! # IO Layer
//!
//! Adapts HTTP requests to domain operations and domain results to the JSON
//! DTOs in the `shared` crate. Domain errors are translated to status codes
//! and flash-style messages here and nowhere else.

pub mod rest;

pub use rest::*;
