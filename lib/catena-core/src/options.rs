//! Per-call options.
//!
//! [`CallOptions`] carries everything about a call except its target: method,
//! headers, body, and an optional timeout. Interceptors that want to alter a
//! call clone the options from their chain, modify the clone, and forward it.
//!
//! # Example
//!
//! ```
//! use catena_core::{CallOptions, Method};
//! use bytes::Bytes;
//!
//! let options = CallOptions::builder()
//!     .method(Method::Post)
//!     .header("Accept", "application/json")
//!     .body(Bytes::from_static(b"{}"))
//!     .build();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::Method;

/// Options for a single outbound call.
///
/// The empty value (`CallOptions::default()`) is a GET with no headers, no
/// body, and no timeout.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    method: Method,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl CallOptions {
    /// Creates a new [`CallOptionsBuilder`].
    #[must_use]
    pub fn builder() -> CallOptionsBuilder {
        CallOptionsBuilder::default()
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Call headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Call body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Call timeout, if one is set.
    ///
    /// This is the opaque cancellation signal of the pipeline: the chain
    /// never acts on it, executors honor it to the extent they choose.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Replaces the method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: impl Into<Option<Bytes>>) {
        self.body = body.into();
    }

    /// Replaces the timeout.
    pub fn set_timeout(&mut self, timeout: impl Into<Option<Duration>>) {
        self.timeout = timeout.into();
    }

    /// Consume into (method, headers, body, timeout).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        HashMap<String, String>,
        Option<Bytes>,
        Option<Duration>,
    ) {
        (self.method, self.headers, self.body, self.timeout)
    }
}

/// Builder for [`CallOptions`].
#[derive(Debug, Clone, Default)]
pub struct CallOptionsBuilder {
    method: Method,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl CallOptionsBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the call timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a JSON body and the matching `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    /// Sets a form-urlencoded body and the matching `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body))
    }

    /// Builds the [`CallOptions`].
    #[must_use]
    pub fn build(self) -> CallOptions {
        CallOptions {
            method: self.method,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        }
    }
}
