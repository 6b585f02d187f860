//! Core types for the catena interceptor-chain HTTP client.
//!
//! This crate provides the foundational types used by catena:
//! - [`Method`] - HTTP method enum
//! - [`Target`] - Request target (resolved URL or string path)
//! - [`CallOptions`] and [`CallOptionsBuilder`] - Per-call options
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`StatusCode`] and [`header`] - Re-exported from the `http` crate

mod body;
mod error;
mod method;
mod options;
pub mod prelude;
mod response;
mod target;

pub use body::{ContentType, from_json, to_form, to_json};
pub use error::{Error, Result};
pub use method::Method;
pub use options::{CallOptions, CallOptionsBuilder};
pub use response::Response;
pub use target::Target;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
