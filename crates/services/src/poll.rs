use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Refresh cadence of the patient dashboard.
pub const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Call `tick` once per `period`, starting one full period from now.
///
/// Never returns. Dropping the future cancels the timer, so owners scope it to
/// their own lifetime (a spawned task they abort, or a UI future dropped on unmount).
pub async fn poll_every<F>(period: Duration, mut tick: F)
where
    F: FnMut(),
{
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        tracing::debug!(period_secs = period.as_secs(), "poll tick");
        tick();
    }
}
