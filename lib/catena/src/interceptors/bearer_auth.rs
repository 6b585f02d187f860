//! Bearer token authentication interceptor.
//!
//! Injects an `Authorization: Bearer <token>` header into the forwarded
//! options of every call.

use std::sync::Arc;

use crate::chain::Chain;
use crate::executor::ResponseFuture;
use crate::interceptor::Intercept;

/// Interceptor that adds bearer token authentication to calls.
#[derive(Debug, Clone)]
pub struct BearerAuthInterceptor {
    token: Arc<str>,
}

impl BearerAuthInterceptor {
    /// Create a new bearer auth interceptor with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl Intercept for BearerAuthInterceptor {
    fn intercept(&self, chain: Chain) -> ResponseFuture {
        let target = chain.target().clone();
        let mut options = chain.options().clone();
        options.headers_mut().insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        );

        Box::pin(async move { chain.proceed(target, options).await })
    }
}
