//! The chain client and its builder.
//!
//! [`Client`] is the composition root: it resolves a call's target against an
//! optional base address, builds the [`Chain`] at position zero, and starts
//! the pipeline. Everything else — what happens to the request on the way
//! down and to the response on the way up — belongs to the registered
//! interceptors and the terminal executor.

use std::future::Future;
use std::sync::Arc;

use catena_core::{CallOptions, Error, Response, Result, Target};

use crate::chain::Chain;
use crate::config::ExecutorConfigBuilder;
use crate::executor::{Execute, Executor, ResponseFuture};
use crate::hyper_executor::HyperExecutor;
use crate::interceptor::Interceptor;

/// HTTP client that threads every call through an interceptor chain.
///
/// Cheap to clone; clones share the interceptor sequence and executor.
///
/// # Example
///
/// ```ignore
/// use catena::Client;
/// use catena::interceptors::LoggingInterceptor;
///
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .interceptor(LoggingInterceptor::new())
///     .build()?;
///
/// let response = client.get("/users/1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Option<String>,
    interceptors: Arc<[Interceptor]>,
    executor: Executor,
}

impl Client {
    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with no base address, no interceptors, and the
    /// default network executor.
    ///
    /// Every target handed to [`Client::fetch`] must then be absolute.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: None,
            interceptors: Arc::from([]),
            executor: Executor::from(HyperExecutor::new()),
        }
    }

    /// The configured base address, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Perform a call through the interceptor pipeline.
    ///
    /// The target is resolved first: parsed URLs and absolute strings pass
    /// through untouched, relative paths are joined onto the base address
    /// with a guaranteed leading slash, and with no base configured a
    /// relative path reaches the executor unresolved. The resolved target
    /// then travels the chain from position zero, and the executor's
    /// response unwinds back through every interceptor in reverse order.
    ///
    /// # Errors
    ///
    /// Fails with the first error any interceptor or the executor produced,
    /// unchanged.
    pub async fn fetch(
        &self,
        target: impl Into<Target>,
        options: CallOptions,
    ) -> Result<Response> {
        let resolved = self.resolve(target.into());
        let chain = Chain::first(
            Arc::clone(&self.interceptors),
            self.executor.clone(),
            resolved.clone(),
            options.clone(),
        );
        chain.proceed(resolved, options).await
    }

    /// GET the target with empty options.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, target: impl Into<Target>) -> Result<Response> {
        self.fetch(target, CallOptions::default()).await
    }

    /// DELETE the target with empty options.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete(&self, target: impl Into<Target>) -> Result<Response> {
        let options = CallOptions::builder()
            .method(catena_core::Method::Delete)
            .build();
        self.fetch(target, options).await
    }

    /// POST a JSON body to the target.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the call fails.
    pub async fn post_json<T: serde::Serialize + Send + Sync>(
        &self,
        target: impl Into<Target>,
        body: &T,
    ) -> Result<Response> {
        let options = CallOptions::builder()
            .method(catena_core::Method::Post)
            .json(body)?
            .build();
        self.fetch(target, options).await
    }

    /// PUT a JSON body to the target.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the call fails.
    pub async fn put_json<T: serde::Serialize + Send + Sync>(
        &self,
        target: impl Into<Target>,
        body: &T,
    ) -> Result<Response> {
        let options = CallOptions::builder()
            .method(catena_core::Method::Put)
            .json(body)?
            .build();
        self.fetch(target, options).await
    }

    /// Resolve a target against the base address.
    ///
    /// Absolute targets pass through byte-for-byte; no normalization is
    /// applied to them.
    fn resolve(&self, target: Target) -> Target {
        let Target::Path(path) = target else {
            return target;
        };
        if path.starts_with("http://") || path.starts_with("https://") {
            return Target::Path(path);
        }

        match &self.base_url {
            Some(base) => {
                if path.starts_with('/') {
                    Target::Path(format!("{base}{path}"))
                } else {
                    Target::Path(format!("{base}/{path}"))
                }
            }
            // No base address configured: hand the path through unresolved
            // and let the executor report it.
            None => Target::Path(path),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// A client is itself an executor, so it can stand in anywhere the ambient
/// fetch capability is expected — including as the terminal executor of
/// another client's pipeline.
impl Execute for Client {
    fn execute(&self, target: Target, options: CallOptions) -> ResponseFuture {
        let client = self.clone();
        Box::pin(async move { client.fetch(target, options).await })
    }
}

/// Builder for [`Client`].
///
/// Interceptors run in insertion order on the way down and in reverse order
/// on the way up. Validation happens in [`ClientBuilder::build`]; a call
/// never fails because of configuration.
///
/// # Example
///
/// ```ignore
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .interceptor_fn(|chain| async move {
///         let target = chain.target().clone();
///         let options = chain.options().clone();
///         chain.proceed(target, options).await
///     })
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    interceptors: Vec<Interceptor>,
    executor: Option<Executor>,
    config: ExecutorConfigBuilder,
}

impl ClientBuilder {
    /// Set the base address relative targets are resolved against.
    ///
    /// Must be an absolute URL without a trailing slash; checked by
    /// [`ClientBuilder::build`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Append an interceptor in object form (anything implementing
    /// [`crate::Intercept`], or an already-normalized [`Interceptor`]).
    #[must_use]
    pub fn interceptor(mut self, interceptor: impl Into<Interceptor>) -> Self {
        self.interceptors.push(interceptor.into());
        self
    }

    /// Append an interceptor given as a plain async closure.
    #[must_use]
    pub fn interceptor_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Chain) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.interceptor(Interceptor::from_fn(f))
    }

    /// Replace the terminal executor.
    ///
    /// When set, the executor-config passthroughs on this builder are
    /// ignored.
    #[must_use]
    pub fn executor(mut self, executor: impl Into<Executor>) -> Self {
        self.executor = Some(executor.into());
        self
    }

    /// Replace the terminal executor with a plain async closure.
    #[must_use]
    pub fn executor_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Target, CallOptions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.executor(Executor::from_fn(f))
    }

    /// Set the default request timeout of the default executor.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout of the default executor.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host of the default executor.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout of the default executor.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the base address ends with a
    /// slash or is not an absolute URL. This is the only place configuration
    /// is validated; [`Client::fetch`] never raises configuration errors.
    pub fn build(self) -> Result<Client> {
        if let Some(base) = &self.base_url {
            if base.ends_with('/') {
                return Err(Error::configuration(format!(
                    "base address must not end with a slash: '{base}'"
                )));
            }
            url::Url::parse(base).map_err(|e| {
                Error::configuration(format!("invalid base address '{base}': {e}"))
            })?;
        }

        let executor = self.executor.unwrap_or_else(|| {
            Executor::from(HyperExecutor::with_config(self.config.build()))
        });

        Ok(Client {
            base_url: self.base_url,
            interceptors: Arc::from(self.interceptors),
            executor,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;

    use super::*;

    fn stub_executor() -> Executor {
        Executor::from_fn(|target, _options| async move {
            Ok(Response::new(
                200,
                HashMap::new(),
                Bytes::from(target.as_str().to_string()),
            ))
        })
    }

    #[test]
    fn build_rejects_trailing_slash() {
        let err = Client::builder()
            .base_url("https://api.example.com/")
            .build()
            .expect_err("trailing slash");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("must not end with a slash"));
    }

    #[test]
    fn build_rejects_non_url_base() {
        let err = Client::builder()
            .base_url("api.example.com")
            .build()
            .expect_err("relative base");
        assert!(err.is_configuration());
    }

    #[test]
    fn build_accepts_clean_base() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .executor(stub_executor())
            .build()
            .expect("client");
        assert_eq!(client.base_url(), Some("https://api.example.com"));
    }

    #[test]
    fn build_with_executor_config_passthroughs() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .timeout(std::time::Duration::from_secs(5))
            .connect_timeout(std::time::Duration::from_secs(2))
            .pool_idle_per_host(8)
            .build()
            .expect("client");
        assert_eq!(client.base_url(), Some("https://api.example.com"));
    }

    #[tokio::test]
    async fn fetch_resolves_relative_path() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .executor(stub_executor())
            .build()
            .expect("client");

        let response = client.get("/get").await.expect("response");
        assert_eq!(response.text().expect("text"), "https://api.example.com/get");
    }

    #[tokio::test]
    async fn fetch_normalizes_missing_leading_slash() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .executor(stub_executor())
            .build()
            .expect("client");

        let response = client.get("get").await.expect("response");
        assert_eq!(response.text().expect("text"), "https://api.example.com/get");
    }

    #[tokio::test]
    async fn fetch_passes_absolute_target_through() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .executor(stub_executor())
            .build()
            .expect("client");

        let response = client
            .get("https://other.example.com/x")
            .await
            .expect("response");
        assert_eq!(response.text().expect("text"), "https://other.example.com/x");
    }

    #[tokio::test]
    async fn fetch_without_base_leaves_relative_target_unresolved() {
        let client = Client::builder()
            .executor(stub_executor())
            .build()
            .expect("client");

        let response = client.get("/lonely").await.expect("response");
        assert_eq!(response.text().expect("text"), "/lonely");
    }

    #[tokio::test]
    async fn fetch_passes_parsed_url_through() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .executor(stub_executor())
            .build()
            .expect("client");

        let url = url::Url::parse("https://direct.example.com/z").expect("url");
        let response = client.get(url).await.expect("response");
        assert_eq!(response.text().expect("text"), "https://direct.example.com/z");
    }

    #[tokio::test]
    async fn client_as_executor_layers_pipelines() {
        let inner = Client::builder()
            .executor(stub_executor())
            .interceptor_fn(|chain| async move {
                let target = chain.target().clone();
                let options = chain.options().clone();
                let response = chain.proceed(target, options).await?;
                Ok(response.with_body("inner"))
            })
            .build()
            .expect("inner client");

        let outer = Client::builder()
            .base_url("https://api.example.com")
            .executor(inner)
            .build()
            .expect("outer client");

        let response = outer.get("/nested").await.expect("response");
        assert_eq!(response.text().expect("text"), "inner");
    }
}
