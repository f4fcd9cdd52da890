//! Deferred async work returned from update functions.
//!
//! Mirrors the shape of an Elm-style command: an update never awaits
//! anything itself, it returns a `Task` that the runtime spawns. Each future
//! resolves to at most one message.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

pub struct Task<M> {
    futures: Vec<BoxFuture<'static, Option<M>>>,
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}

impl<M: Send + 'static> Task<M> {
    /// A task that does nothing.
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// A task that immediately yields `message`.
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![futures::future::ready(Some(message)).boxed()],
        }
    }

    /// Run `future` and map its output into a message.
    pub fn perform<F, T>(
        future: F,
        map: impl FnOnce(T) -> M + Send + 'static,
    ) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        Self {
            futures: vec![future.map(|output| Some(map(output))).boxed()],
        }
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|task| task.futures).collect(),
        }
    }

    pub fn map<N: Send + 'static>(
        self,
        f: impl Fn(M) -> N + Send + Sync + 'static,
    ) -> Task<N> {
        let f = Arc::new(f);
        Task {
            futures: self
                .futures
                .into_iter()
                .map(|future| {
                    let f = Arc::clone(&f);
                    future.map(move |message| message.map(|m| f(m))).boxed()
                })
                .collect(),
        }
    }

    /// Bind every future to `token`: once cancelled, the future is dropped
    /// at its next suspension point and resolves without a message.
    pub fn cancel_with(self, token: &CancellationToken) -> Self {
        Self {
            futures: self
                .futures
                .into_iter()
                .map(|future| {
                    let token = token.clone();
                    async move {
                        tokio::select! {
                            biased;
                            _ = token.cancelled() => None,
                            message = future => message,
                        }
                    }
                    .boxed()
                })
                .collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, Option<M>>> {
        self.futures
    }
}

impl<M: Send + 'static> Default for Task<M> {
    fn default() -> Self {
        Self::none()
    }
}
