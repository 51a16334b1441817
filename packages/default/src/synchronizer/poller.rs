use super::EnvironmentSynchronizer;
use crate::api::EnvironmentApi;
use crate::models::config::DEFAULT_POLL_INTERVAL;
use crate::render::RenderedList;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{info, warn};

/// Handle to a running polling loop.
///
/// Dropping the handle leaves the loop running for the life of the runtime.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stops future ticks. Refreshes already in flight still complete.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a loop that refreshes `sync` immediately and then every `period`.
///
/// Each tick runs its refresh as a separate task, so a slow or hung request
/// never delays the next tick and overlapping refreshes are not merged.
pub fn spawn_polling<A: EnvironmentApi>(
    sync: Arc<EnvironmentSynchronizer<A>>,
    period: Duration,
) -> PollHandle {
    let period = if period.is_zero() {
        warn!(
            "Poll interval of zero is not allowed, using {:?}",
            DEFAULT_POLL_INTERVAL
        );
        DEFAULT_POLL_INTERVAL
    } else {
        period
    };

    PollHandle {
        task: tokio::spawn(run_polling_loop(sync, period)),
    }
}

async fn run_polling_loop<A: EnvironmentApi>(
    sync: Arc<EnvironmentSynchronizer<A>>,
    period: Duration,
) {
    info!("🔄 Starting environment polling loop (every {:?})...", period);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let sync = Arc::clone(&sync);
        tokio::spawn(async move {
            // failures are logged by refresh and never stop the loop
            let _ = sync.refresh().await;
        });
    }
}

/// Refreshes once, reports the resulting list, then polls every `period` and
/// reports each change until `shutdown` resolves.
///
/// The first list is reported even when it is empty and so equal to the
/// starting mirror. Polling is cancelled on return.
pub async fn follow_changes<A, F, S>(
    sync: Arc<EnvironmentSynchronizer<A>>,
    period: Duration,
    mut on_list: F,
    shutdown: S,
) where
    A: EnvironmentApi,
    F: FnMut(&RenderedList),
    S: Future<Output = ()>,
{
    let mut changes = sync.subscribe();
    // failures are logged by refresh; the empty mirror is reported instead
    let _ = sync.refresh().await;
    on_list(&*changes.borrow_and_update());

    let poller = spawn_polling(Arc::clone(&sync), period);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                on_list(&*changes.borrow_and_update());
            }
        }
    }

    info!("Stopping environment watch");
    poller.cancel();
}
