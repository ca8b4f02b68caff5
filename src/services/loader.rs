use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Lifecycle of a value fetched asynchronously
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// What happened to the result of a single `load` call
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Ready(T),
    Failed(String),
    /// A newer load or a cancel superseded this one; its result was discarded
    Stale,
}

/// Holds the latest fetched value and notifies subscribers of every state change.
///
/// Each call to [`Loader::begin`] hands out a new token. A completion is only
/// applied while its token is still the newest, so a slow response can never
/// overwrite the result of a request issued after it.
pub struct Loader<T> {
    name: &'static str,
    generation: AtomicU64,
    state: watch::Sender<LoadState<T>>,
}

impl<T> Loader<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            name,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoadState<T> {
        self.state.borrow().clone()
    }

    /// The loaded value, if the last applied load succeeded
    pub fn current(&self) -> Option<T> {
        match &*self.state.borrow() {
            LoadState::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Start a load and return its token
    pub fn begin(&self) -> u64 {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);
        debug!(loader = self.name, token, "Load started");
        token
    }

    /// Apply the result for `token` unless a newer load or a cancel happened since.
    pub fn complete<E: fmt::Display>(&self, token: u64, result: Result<T, E>) -> LoadOutcome<T> {
        let mut outcome = LoadOutcome::Stale;

        // The token check runs under the channel lock so it cannot interleave with another completion.
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != token {
                return false;
            }
            match &result {
                Ok(value) => {
                    *state = LoadState::Ready(value.clone());
                    outcome = LoadOutcome::Ready(value.clone());
                }
                Err(error) => {
                    *state = LoadState::Failed(error.to_string());
                    outcome = LoadOutcome::Failed(error.to_string());
                }
            }
            true
        });

        match &outcome {
            LoadOutcome::Ready(_) => debug!(loader = self.name, token, "Load applied"),
            LoadOutcome::Failed(message) => {
                crate::error_with_trace!(loader = self.name, token, error = %message, "Load failed")
            }
            LoadOutcome::Stale => {
                debug!(loader = self.name, token, "Discarding stale load result")
            }
        }

        outcome
    }

    /// Run `fetch` as a new load
    #[instrument(skip(self, fetch), fields(loader = self.name))]
    pub async fn load<F, Fut, E>(&self, fetch: F) -> LoadOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let token = self.begin();
        let result = fetch().await;
        self.complete(token, result)
    }

    /// Drop the in-flight load, if any, and go back to `Idle`.
    ///
    /// Returns false when nothing was loading.
    pub fn cancel(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let cancelled = self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = LoadState::Idle;
                true
            } else {
                false
            }
        });
        if cancelled {
            crate::info_with_trace!(loader = self.name, "Load cancelled");
        }
        cancelled
    }

    /// Wait until no load is in flight and return the resulting state
    pub async fn settled(&self) -> LoadState<T> {
        let mut receiver = self.subscribe();
        let state = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }
}
