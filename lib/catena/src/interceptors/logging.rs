//! Request/response logging interceptor.
//!
//! Logs each call using the `tracing` crate: the forwarded method and target
//! on the way down, the status and elapsed time on the unwind.

use std::time::Instant;

use tracing::{Instrument, Level, debug, info, span, warn};

use crate::chain::Chain;
use crate::executor::ResponseFuture;
use crate::interceptor::Intercept;

/// Interceptor that logs requests and responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor {
    level: LogLevel,
}

/// Log level for the logging interceptor.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingInterceptor {
    /// Create a new logging interceptor with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging interceptor that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl Intercept for LoggingInterceptor {
    fn intercept(&self, chain: Chain) -> ResponseFuture {
        let target = chain.target().clone();
        let options = chain.options().clone();
        let method = options.method();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, target = %target);

        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            method = %method,
                            target = %target,
                            headers = ?options.headers(),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(method = %method, target = %target, "sending request");
                    }
                }

                let result = chain.proceed(target, options).await;
                let elapsed = start.elapsed();

                let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        if response.is_success() {
                            info!(status, elapsed_ms, "request completed");
                        } else {
                            warn!(status, elapsed_ms, "request failed with HTTP error");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_interceptor_default() {
        let interceptor = LoggingInterceptor::new();
        assert!(matches!(interceptor.level, LogLevel::Info));
    }

    #[test]
    fn logging_interceptor_debug() {
        let interceptor = LoggingInterceptor::debug();
        assert!(matches!(interceptor.level, LogLevel::Debug));
    }
}
