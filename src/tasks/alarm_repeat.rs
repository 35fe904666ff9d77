//! Alarm repeat background task

use tokio::time::{interval_at, Instant};
use tracing::{debug, error};

use crate::timer::TimerService;

/// Plays the alarm once per period until the alarm is acknowledged or the
/// timer is reconfigured
pub async fn alarm_repeat_task(timer: TimerService, generation: u64) {
    let period = timer.settings().alarm_interval;
    debug!("Starting alarm repeat (generation {}, every {:?})", generation, period);

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match timer.ring(generation) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Alarm repeat {} ended", generation);
                break;
            }
            Err(e) => {
                error!("Alarm repeat failed: {}", e);
                break;
            }
        }
    }
}
