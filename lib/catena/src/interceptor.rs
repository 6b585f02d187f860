//! Interceptor capabilities.
//!
//! An interceptor receives the [`Chain`] at its position and must produce a
//! response. It can inspect or replace the forwarded target/options before
//! calling [`Chain::proceed`], and inspect or transform the response after
//! awaiting it. An interceptor that never proceeds short-circuits the rest of
//! the pipeline with a locally-produced response.
//!
//! Two registration forms are accepted and normalized into the same
//! function-shaped [`Interceptor`] value:
//! - a plain async closure, via [`Interceptor::from_fn`];
//! - any type implementing [`Intercept`], via `From`/`Into`.

use std::future::Future;
use std::sync::Arc;

use crate::chain::Chain;
use crate::executor::ResponseFuture;

/// Object-form interceptor capability.
///
/// # Example
///
/// ```ignore
/// struct StaticHeader {
///     name: String,
///     value: String,
/// }
///
/// impl Intercept for StaticHeader {
///     fn intercept(&self, chain: Chain) -> ResponseFuture {
///         let mut options = chain.options().clone();
///         options.headers_mut().insert(self.name.clone(), self.value.clone());
///         let target = chain.target().clone();
///         Box::pin(async move { chain.proceed(target, options).await })
///     }
/// }
/// ```
pub trait Intercept: Send + Sync + 'static {
    /// Handle the call at this chain position.
    ///
    /// Continue the pipeline with `chain.proceed(...)`, or return a response
    /// without proceeding to short-circuit everything downstream.
    fn intercept(&self, chain: Chain) -> ResponseFuture;
}

/// A normalized, shareable interceptor capability.
///
/// Internally function-shaped: `(Chain) -> ResponseFuture`. The pipeline
/// treats interceptors as stateless; any state lives inside the closure or
/// the [`Intercept`] instance it was built from.
#[derive(Clone)]
pub struct Interceptor {
    inner: Arc<dyn Fn(Chain) -> ResponseFuture + Send + Sync>,
}

impl Interceptor {
    /// Creates an interceptor from an async closure.
    ///
    /// # Example
    ///
    /// ```
    /// use catena::Interceptor;
    ///
    /// let passthrough = Interceptor::from_fn(|chain| async move {
    ///     let target = chain.target().clone();
    ///     let options = chain.options().clone();
    ///     chain.proceed(target, options).await
    /// });
    /// ```
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Chain) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = catena_core::Result<catena_core::Response>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |chain| Box::pin(f(chain))),
        }
    }

    /// Invoke the interceptor with the chain at its position.
    pub(crate) fn call(&self, chain: Chain) -> ResponseFuture {
        (self.inner)(chain)
    }
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor").finish_non_exhaustive()
    }
}

impl<I: Intercept> From<I> for Interceptor {
    fn from(interceptor: I) -> Self {
        let interceptor = Arc::new(interceptor);
        Self {
            inner: Arc::new(move |chain| interceptor.intercept(chain)),
        }
    }
}
