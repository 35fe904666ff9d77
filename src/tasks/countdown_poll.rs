//! Countdown poll background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::timer::{PollOutcome, Render, TimerService};

/// Polls a running countdown at a fixed period until it expires, is stopped,
/// or its generation is cancelled
pub async fn countdown_poll_task(timer: TimerService, generation: u64, render: Arc<dyn Render>) {
    let period = timer.settings().poll_interval;
    debug!("Starting countdown poll (generation {}, every {:?})", generation, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match timer.poll_tick(generation, render.as_ref()) {
            Ok(Some(PollOutcome::Waiting)) | Ok(Some(PollOutcome::Tick(_))) => {}
            Ok(Some(PollOutcome::Expired(_))) => {
                debug!("Countdown poll {} finished at zero", generation);
                break;
            }
            Ok(Some(PollOutcome::Inactive)) | Ok(None) => {
                debug!("Countdown poll {} cancelled", generation);
                break;
            }
            Err(e) => {
                error!("Countdown poll failed: {}", e);
                break;
            }
        }
    }
}
