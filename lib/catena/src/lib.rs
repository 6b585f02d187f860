//! Interceptor-chain HTTP client for Rust.
//!
//! Every call travels an ordered interceptor pipeline ending in a terminal
//! executor: each interceptor sees the request on the way down, the response
//! on the way up, and decides what to forward either way.
//!
//! # Example
//!
//! ```ignore
//! use catena::{CallOptions, Client};
//!
//! let client = Client::builder()
//!     .base_url("https://api.example.com")
//!     .interceptor_fn(|chain| async move {
//!         let target = chain.target().clone();
//!         let mut options = chain.options().clone();
//!         options.headers_mut().insert("X-Request-Id".into(), "42".into());
//!         chain.proceed(target, options).await
//!     })
//!     .build()?;
//!
//! let response = client.get("/users/1").await?;
//! let user: serde_json::Value = response.json()?;
//! ```

mod chain;
mod client;
mod config;
mod connector;
mod executor;
mod hyper_executor;
mod interceptor;
pub mod interceptors;
pub mod prelude;

pub use chain::Chain;
pub use client::{Client, ClientBuilder};
pub use config::{ExecutorConfig, ExecutorConfigBuilder};
pub use executor::{Execute, Executor, ResponseFuture};
pub use hyper_executor::HyperExecutor;
pub use interceptor::{Intercept, Interceptor};

// Re-export core types
pub use catena_core::{
    CallOptions, CallOptionsBuilder, ContentType, Error, Method, Response, Result, Target,
    from_json, to_form, to_json,
};

// Re-export http types for status codes and headers
pub use catena_core::{StatusCode, header};
