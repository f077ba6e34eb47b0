use crate::{IntoLoadable, Loadable, LoadableError, Payload};
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

type Reducer<T, E> = Box<dyn FnOnce(Loadable<T, E>) -> Loadable<T, E> + Send>;
type Action<T, E> = Box<dyn FnOnce(Loadable<T, E>) + Send>;

/// A cell holding the current [`Loadable`] state of one request.
///
/// Updates go through a queue drained by a background task, so they apply in
/// the order they were issued. Observers follow the state through
/// [`to_signal`](Self::to_signal) or [`to_stream`](Self::to_stream).
///
/// Only the most recently issued request may settle the state. A request
/// that is still running when the next `execute*` call (or [`reset`](Self::reset))
/// is made has its result discarded.
///
/// Must be created inside a tokio runtime.
pub struct LoadableStore<T: Payload, E: Payload> {
    state: Mutable<Loadable<T, E>>,
    set_state_tx: UnboundedSender<Reducer<T, E>>,
    with_state_tx: UnboundedSender<Action<T, E>>,
    generation: Arc<AtomicU64>,
}

impl<T: Payload, E: Payload> LoadableStore<T, E> {
    pub fn new(initial_state: Loadable<T, E>) -> Self {
        let state = Mutable::new(initial_state);
        let (set_state_tx, set_state_rx) = tokio::sync::mpsc::unbounded_channel::<Reducer<T, E>>();
        let (with_state_tx, with_state_rx) = tokio::sync::mpsc::unbounded_channel::<Action<T, E>>();

        let state_clone = state.clone();

        tokio::spawn(async move {
            Self::process_queue(state_clone, set_state_rx, with_state_rx).await;
        });

        LoadableStore {
            state,
            set_state_tx,
            with_state_tx,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn inactive() -> Self {
        Self::new(Loadable::Inactive)
    }

    async fn process_queue(
        state: Mutable<Loadable<T, E>>,
        mut set_state_rx: UnboundedReceiver<Reducer<T, E>>,
        mut with_state_rx: UnboundedReceiver<Action<T, E>>,
    ) {
        loop {
            tokio::select! {
                biased;
                Some(reducer) = set_state_rx.recv() => {
                    let new_state = reducer(state.get_cloned());
                    trace!(kind = ?new_state.kind(), "state updated");
                    state.set(new_state)
                }
                Some(action) = with_state_rx.recv() => {
                    action(state.get_cloned());
                }
                else => break,
            }
        }
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<Loadable<T, E>>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<Loadable<T, E>> {
        self.state.signal_cloned()
    }

    pub fn set_state<F>(&self, reducer: F) -> Result<(), LoadableError>
    where
        F: FnOnce(Loadable<T, E>) -> Loadable<T, E> + Send + 'static,
    {
        self.set_state_tx
            .send(Box::new(reducer))
            .map_err(|_| LoadableError::Closed)
    }

    pub fn with_state<F>(&self, action: F) -> Result<(), LoadableError>
    where
        F: FnOnce(Loadable<T, E>) + Send + 'static,
    {
        self.with_state_tx
            .send(Box::new(action))
            .map_err(|_| LoadableError::Closed)
    }

    /// Puts the store back to [`Loadable::Inactive`]. A request still in
    /// flight no longer lands in the store.
    pub fn reset(&self) -> Result<(), LoadableError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_state(|_| Loadable::Inactive)
    }

    /// The current state, which may not yet reflect queued updates.
    pub fn get_state(&self) -> Loadable<T, E> {
        self.state.get_cloned()
    }

    pub fn loaded_value(&self) -> Option<T> {
        self.state.lock_ref().loaded_value().cloned()
    }

    /// The state once every update queued before this call has been applied.
    pub async fn await_state(&self) -> Result<Loadable<T, E>, LoadableError> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.with_state(move |state| {
            let _ = tx.send(state);
        })?;
        rx.await.map_err(|_| LoadableError::Closed)
    }

    /// Marks the store loading, then stores whatever `request` resolves to
    /// unless a newer request has been issued in the meantime.
    fn spawn_request<Fut>(&self, request: Fut) -> Result<(), LoadableError>
    where
        Fut: Future<Output = Loadable<T, E>> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(|_| Loadable::Loading)?;

        let latest = self.generation.clone();
        let set_state_tx = self.set_state_tx.clone();
        tokio::spawn(async move {
            // Yield to allow the loading state to be observed before the request runs
            tokio::task::yield_now().await;
            let result = request.await;
            debug!(generation, kind = ?result.kind(), "request finished");
            let settle: Reducer<T, E> = Box::new(move |state| {
                if latest.load(Ordering::SeqCst) == generation {
                    result
                } else {
                    debug!(generation, "superseded request discarded");
                    state
                }
            });
            if set_state_tx.send(settle).is_err() {
                debug!(generation, "store closed before the request finished");
            }
        });
        Ok(())
    }

    pub fn execute<R, Fut>(&self, computation: Fut) -> Result<(), LoadableError>
    where
        R: IntoLoadable<Value = T, Error = E>,
        Fut: Future<Output = R> + Send + 'static,
    {
        debug!("request started");
        self.spawn_request(async move { computation.await.into_loadable() })
    }

    /// Runs `computation` on the blocking thread pool. A panic inside it
    /// fails the request with [`LoadableError::Error`].
    pub fn execute_blocking<R, F>(&self, computation: F) -> Result<(), LoadableError>
    where
        R: IntoLoadable<Value = T, Error = E> + Send + 'static,
        F: FnOnce() -> R + Send + 'static,
        E: From<LoadableError>,
    {
        debug!("blocking request started");
        self.spawn_request(async move {
            match tokio::task::spawn_blocking(computation).await {
                Ok(result) => result.into_loadable(),
                Err(join_error) => {
                    Loadable::Failed(E::from(LoadableError::error(join_error.to_string())))
                }
            }
        })
    }

    /// Cancelling `cancellation_token` before the request finishes fails it
    /// with [`LoadableError::Cancelled`].
    pub fn execute_cancellable<R, F, Fut>(
        &self,
        cancellation_token: CancellationToken,
        computation: F,
    ) -> Result<(), LoadableError>
    where
        R: IntoLoadable<Value = T, Error = E>,
        Fut: Future<Output = R> + Send + 'static,
        F: FnOnce(CancellationToken) -> Fut,
        E: From<LoadableError>,
    {
        debug!("cancellable request started");
        let request = computation(cancellation_token.clone());
        self.spawn_request(async move {
            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => {
                    debug!("request cancelled");
                    Loadable::Failed(E::from(LoadableError::Cancelled))
                }
                result = request => result.into_loadable(),
            }
        })
    }

    /// A request still running after `timeout` fails with
    /// [`LoadableError::Timeout`].
    pub fn execute_with_timeout<R, Fut>(
        &self,
        computation: Fut,
        timeout: Duration,
    ) -> Result<(), LoadableError>
    where
        R: IntoLoadable<Value = T, Error = E>,
        Fut: Future<Output = R> + Send + 'static,
        E: From<LoadableError>,
    {
        debug!(?timeout, "request with timeout started");
        self.spawn_request(async move {
            match tokio::time::timeout(timeout, computation).await {
                Ok(result) => result.into_loadable(),
                Err(_) => {
                    debug!("request timed out");
                    Loadable::Failed(E::from(LoadableError::Timeout))
                }
            }
        })
    }
}
