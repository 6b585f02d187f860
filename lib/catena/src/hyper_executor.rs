//! Default network executor built on hyper-util.

use std::collections::HashMap;

use bytes::Bytes;
use catena_core::{CallOptions, Error, Response, Result, Target};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use crate::config::ExecutorConfig;
use crate::connector::https_connector;
use crate::executor::{Execute, ResponseFuture};

/// The ambient network-fetch capability: a pooled hyper client with rustls
/// TLS.
///
/// This is the executor a [`crate::Client`] uses when none is supplied. It
/// has no pipeline awareness; it performs the request it is handed and maps
/// transport failures into [`Error`] values.
#[derive(Clone)]
pub struct HyperExecutor {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ExecutorConfig,
}

impl std::fmt::Debug for HyperExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperExecutor {
    /// Create an executor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor with custom configuration.
    #[must_use]
    pub fn with_config(config: ExecutorConfig) -> Self {
        let connector = https_connector(config.connect_timeout);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Executor configuration.
    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Build a hyper request from a target/options pair.
    fn build_http_request(
        target: &Target,
        options: CallOptions,
    ) -> Result<http::Request<Full<Bytes>>> {
        if !target.is_absolute() {
            return Err(Error::invalid_request(format!(
                "cannot execute relative target '{target}': no base address resolved it"
            )));
        }

        let (method, headers, body, _timeout) = options.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(target.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn run(&self, target: Target, options: CallOptions) -> Result<Response> {
        // Per-call timeout wins over the configured default.
        let timeout = options.timeout().unwrap_or(self.config.timeout);
        let http_request = Self::build_http_request(&target, options)?;

        let response = tokio::time::timeout(timeout, self.inner.request(http_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, response_headers, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Default for HyperExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Execute for HyperExecutor {
    fn execute(&self, target: Target, options: CallOptions) -> ResponseFuture {
        let executor = self.clone();
        Box::pin(async move { executor.run(target, options).await })
    }
}
