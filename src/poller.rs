//! Background polling of status and audience stats.
//!
//! DESIGN
//! ======
//! Two independent interval tasks. The first tick fires immediately so the
//! display fills in on startup. Each tick spawns its request instead of
//! awaiting it, so a slow backend never stretches the poll period; the
//! sequence numbers in `ControllerState` keep out-of-order responses from
//! rolling the cache back.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::RemoteControlClient;
use crate::config::PollIntervals;

/// Handles to the two polling tasks. Dropping them leaves the tasks running.
pub struct Pollers {
    pub status: JoinHandle<()>,
    pub stats: JoinHandle<()>,
}

#[must_use]
pub fn spawn_pollers(client: Arc<RemoteControlClient>, intervals: PollIntervals) -> Pollers {
    let status_client = Arc::clone(&client);
    let status = spawn_interval(intervals.status, move || {
        let client = Arc::clone(&status_client);
        async move {
            // Failures are already recorded on the cache and logged.
            let _ = client.poll_status().await;
        }
    });

    let stats = spawn_interval(intervals.stats, move || {
        let client = Arc::clone(&client);
        async move {
            let _ = client.poll_audience_stats().await;
        }
    });

    Pollers { status, stats }
}

fn spawn_interval<F, Fut>(period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            tokio::spawn(tick());
        }
    })
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
