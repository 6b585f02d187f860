//! The interceptor chain.
//!
//! A [`Chain`] is an immutable cursor over the pipeline: a position into a
//! shared interceptor sequence, the shared terminal executor, and the
//! target/options pair captured at that position. Advancing never mutates a
//! chain; every [`Chain::proceed`] call allocates the next cursor and hands it
//! to the interceptor at the current position.
//!
//! The full traversal is the composition of nested asynchronous calls, one
//! per interceptor plus the terminal executor, unwound in reverse once the
//! executor resolves. There is no loop and no shared mutable state: chains
//! from concurrent calls never observe each other.

use std::sync::Arc;

use catena_core::{CallOptions, Target};

use crate::executor::{Executor, ResponseFuture};
use crate::interceptor::Interceptor;

/// Immutable pipeline cursor handed to each interceptor.
///
/// Cloning a chain is cheap: the interceptor sequence and executor are shared
/// read-only references, never copied.
#[derive(Debug, Clone)]
pub struct Chain {
    position: usize,
    interceptors: Arc<[Interceptor]>,
    executor: Executor,
    target: Target,
    options: CallOptions,
}

impl Chain {
    /// The chain at position zero, carrying the initial target and options.
    pub(crate) fn first(
        interceptors: Arc<[Interceptor]>,
        executor: Executor,
        target: Target,
        options: CallOptions,
    ) -> Self {
        Self {
            position: 0,
            interceptors,
            executor,
            target,
            options,
        }
    }

    /// The request target captured at this position: whatever the previous
    /// interceptor forwarded, or the client's resolved target at position
    /// zero.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The call options captured at this position. Never absent; a call made
    /// without options carries `CallOptions::default()`.
    #[must_use]
    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    /// Advances the pipeline one step with the given target and options.
    ///
    /// If interceptors remain, the next one is invoked with a fresh chain at
    /// `position + 1` carrying `(target, options)`; otherwise the terminal
    /// executor performs the request. The result, success or failure, is
    /// returned unchanged — this layer adds no wrapping, translation, or
    /// suppression.
    ///
    /// The interceptor chooses what to forward: passing
    /// `chain.target().clone()` and `chain.options().clone()` continues the
    /// call untouched, while substituting either value is how cross-cutting
    /// concerns are layered without the pipeline knowing about them.
    ///
    /// Calling `proceed` more than once on the same chain is supported: each
    /// call builds an independent downstream execution and nothing is
    /// memoized, so the executor runs once per call.
    pub fn proceed(&self, target: Target, options: CallOptions) -> ResponseFuture {
        match self.interceptors.get(self.position) {
            Some(interceptor) => interceptor.call(self.next(target, options)),
            None => self.executor.call(target, options),
        }
    }

    fn next(&self, target: Target, options: CallOptions) -> Self {
        Self {
            position: self.position + 1,
            interceptors: Arc::clone(&self.interceptors),
            executor: self.executor.clone(),
            target,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use catena_core::{Error, Response};

    use super::*;

    fn counting_executor(calls: Arc<AtomicUsize>) -> Executor {
        Executor::from_fn(move |_, _| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Response::new(200, HashMap::new(), Bytes::new()))
            }
        })
    }

    #[tokio::test]
    async fn empty_chain_reaches_executor() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::first(
            Arc::from([]),
            counting_executor(Arc::clone(&calls)),
            Target::from("/x"),
            CallOptions::default(),
        );

        let response = chain
            .proceed(Target::from("/x"), CallOptions::default())
            .await
            .expect("response");

        assert!(response.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn chain_exposes_captured_target_and_options() {
        let chain = Chain::first(
            Arc::from([]),
            counting_executor(Arc::new(AtomicUsize::new(0))),
            Target::from("/users/1"),
            CallOptions::builder().header("Accept", "text/plain").build(),
        );

        assert_eq!(chain.target().as_str(), "/users/1");
        assert_eq!(chain.options().header("Accept"), Some("text/plain"));
    }

    #[tokio::test]
    async fn proceed_twice_runs_executor_twice() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::first(
            Arc::from([]),
            counting_executor(Arc::clone(&calls)),
            Target::from("/x"),
            CallOptions::default(),
        );

        chain
            .proceed(Target::from("/x"), CallOptions::default())
            .await
            .expect("first");
        chain
            .proceed(Target::from("/x"), CallOptions::default())
            .await
            .expect("second");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn executor_error_crosses_proceed_unchanged() {
        let executor = Executor::from_fn(|_, _| async { Err(Error::connection("refused")) });
        let passthrough = Interceptor::from_fn(|chain: Chain| async move {
            let target = chain.target().clone();
            let options = chain.options().clone();
            chain.proceed(target, options).await
        });
        let chain = Chain::first(
            Arc::from([passthrough]),
            executor,
            Target::from("/x"),
            CallOptions::default(),
        );

        let err = chain
            .proceed(Target::from("/x"), CallOptions::default())
            .await
            .expect_err("should fail");
        assert!(err.is_connection());
        assert_eq!(err.to_string(), "connection error: refused");
    }

    #[tokio::test]
    async fn interceptor_observes_forwarded_target() {
        let recorder = Interceptor::from_fn(|chain: Chain| async move {
            assert_eq!(chain.target().as_str(), "/rewritten");
            let options = chain.options().clone();
            chain.proceed(chain.target().clone(), options).await
        });
        let rewriter = Interceptor::from_fn(|chain: Chain| async move {
            let options = chain.options().clone();
            chain.proceed(Target::from("/rewritten"), options).await
        });

        let chain = Chain::first(
            Arc::from([rewriter, recorder]),
            counting_executor(Arc::new(AtomicUsize::new(0))),
            Target::from("/original"),
            CallOptions::default(),
        );

        chain
            .proceed(Target::from("/original"), CallOptions::default())
            .await
            .expect("response");
    }
}
