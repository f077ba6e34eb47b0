use crate::tracing_setup::tracing_init;
use futures_signals::signal::SignalExt;
use rxloadable::{Loadable, LoadableError, LoadableStore, ToStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod tracing_setup;

type Store = LoadableStore<u64, LoadableError>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_init();

    info!("==========================================");
    warn!("example: execute");
    let store = Arc::new(Store::inactive());
    store.execute(async { slow_sum(100_000, false).await })?;
    follow(&store).await;

    info!("==========================================");
    warn!("example: execute with Err");
    let store = Arc::new(Store::inactive());
    store.execute(async { slow_sum(100_000, true).await })?;
    follow(&store).await;

    info!("==========================================");
    warn!("example: execute_blocking");
    let store = Arc::new(Store::inactive());
    store.execute_blocking(|| (0..2_000_000u64).sum::<u64>().checked_sub(1))?;
    follow(&store).await;

    info!("==========================================");
    warn!("example: execute_cancellable, cancelled after 50ms");
    let store = Arc::new(Store::inactive());
    let token = CancellationToken::new();
    store.execute_cancellable(token.clone(), |token| async move {
        for step in 0..10u64 {
            if token.is_cancelled() {
                debug!("Worker thread | stopping at step {}", step);
                return Err(LoadableError::Cancelled);
            }
            sleep(Duration::from_millis(20)).await;
        }
        Ok(10)
    })?;
    let canceller = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });
    follow(&store).await;

    info!("==========================================");
    warn!("example: execute_with_timeout, 50ms budget for a 200ms request");
    let store = Arc::new(Store::inactive());
    store.execute_with_timeout(
        async {
            sleep(Duration::from_millis(200)).await;
            Ok::<u64, LoadableError>(1)
        },
        Duration::from_millis(50),
    )?;
    follow(&store).await;

    info!("==========================================");
    warn!("example: set_state and reset");
    store.set_state(|state| state.recover_error(|_| Some(0)))?;
    info!("  Main thread | recovered: {:?}", store.await_state().await?);
    store.reset()?;
    info!("  Main thread | after reset: {:?}", store.await_state().await?);

    info!("  Main thread | Finish");
    Ok(())
}

/// Logs each state of `store` until its request completes.
async fn follow(store: &Store) {
    store
        .to_signal()
        .stop_if(|state: &Loadable<u64, LoadableError>| state.is_complete())
        .for_each(|state| async move {
            info!("  Main thread | {:?} -> {:?}", state.status(), state);
        })
        .await;
}

async fn slow_sum(count: u64, fail: bool) -> Result<u64, LoadableError> {
    sleep(Duration::from_millis(100)).await;
    if fail {
        return Err(LoadableError::error("sum was not computed"));
    }
    Ok((0..count).sum())
}
