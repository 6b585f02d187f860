//! Terminal executors.
//!
//! An executor is the base case of the interceptor chain: the capability that
//! actually performs a request. It has no pipeline awareness; it receives the
//! final `(target, options)` pair and produces a response.
//!
//! Executors come in two forms, normalized into one function-shaped
//! [`Executor`] value at registration:
//! - a plain async closure, via [`Executor::from_fn`];
//! - any type implementing [`Execute`], via `From`/`Into`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use catena_core::{CallOptions, Response, Result, Target};

/// Boxed future resolving to a response, the output shape of every pipeline
/// step.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Object-form executor capability.
///
/// Implement this for executors that carry state (connection pools,
/// configuration). Closures go through [`Executor::from_fn`] instead.
pub trait Execute: Send + Sync + 'static {
    /// Perform the request described by `(target, options)`.
    ///
    /// # Errors
    ///
    /// Fails with whatever transport error the request produced. Errors are
    /// propagated to the caller of `fetch` unchanged.
    fn execute(&self, target: Target, options: CallOptions) -> ResponseFuture;
}

/// A normalized, shareable executor capability.
///
/// Internally function-shaped: `(Target, CallOptions) -> ResponseFuture`.
/// Cloning is cheap and shares the underlying capability.
#[derive(Clone)]
pub struct Executor {
    inner: Arc<dyn Fn(Target, CallOptions) -> ResponseFuture + Send + Sync>,
}

impl Executor {
    /// Creates an executor from an async closure.
    ///
    /// # Example
    ///
    /// ```
    /// use catena::Executor;
    /// use catena_core::Response;
    /// use bytes::Bytes;
    /// use std::collections::HashMap;
    ///
    /// let executor = Executor::from_fn(|target, _options| async move {
    ///     let _ = target;
    ///     Ok(Response::new(200, HashMap::new(), Bytes::new()))
    /// });
    /// ```
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Target, CallOptions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |target, options| Box::pin(f(target, options))),
        }
    }

    /// Invoke the executor.
    pub(crate) fn call(&self, target: Target, options: CallOptions) -> ResponseFuture {
        (self.inner)(target, options)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl<E: Execute> From<E> for Executor {
    fn from(executor: E) -> Self {
        let executor = Arc::new(executor);
        Self {
            inner: Arc::new(move |target, options| executor.execute(target, options)),
        }
    }
}
