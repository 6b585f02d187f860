//! Bundled interceptors.
//!
//! These are ordinary consumers of the [`crate::Chain`] contract, shipped for
//! convenience; nothing in the pipeline knows about them. Register them like
//! any other interceptor:
//!
//! ```ignore
//! use catena::Client;
//! use catena::interceptors::{BearerAuthInterceptor, LoggingInterceptor};
//!
//! let client = Client::builder()
//!     .base_url("https://api.example.com")
//!     .interceptor(LoggingInterceptor::new())
//!     .interceptor(BearerAuthInterceptor::new("my-token"))
//!     .build()?;
//! ```

mod bearer_auth;
mod logging;

pub use bearer_auth::BearerAuthInterceptor;
pub use logging::{LogLevel, LoggingInterceptor};
