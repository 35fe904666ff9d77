//! Scheduler around the countdown engine.
//!
//! Owns the engine and its single recurring action (countdown poll or alarm
//! repeat) behind one mutex. Each fire of a recurring action takes that lock
//! and checks its generation first, so cancellation is total even for ticks
//! already in flight.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tracing::{debug, info};

use super::{
    clock::Clock,
    engine::{PollOutcome, StopOutcome, TimerEngine, TimerPhase},
    render::{AlarmSound, Render},
    schedule::RecurringSlot,
};
use crate::{
    state::{Preset, TimerSnapshot},
    tasks::{alarm_repeat_task, countdown_poll_task},
};

/// Periods of the two recurring actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    /// How often a running countdown is polled; well under a second so
    /// second boundaries are not missed
    pub poll_interval: Duration,
    /// How often the alarm sound repeats after expiry
    pub alarm_interval: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
            alarm_interval: Duration::from_millis(1200),
        }
    }
}

struct Inner {
    engine: TimerEngine,
    slot: RecurringSlot,
}

/// Cloneable handle to one timer instance
#[derive(Clone)]
pub struct TimerService {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
    alarm: Arc<dyn AlarmSound>,
    settings: TimerSettings,
}

impl fmt::Debug for TimerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl TimerService {
    pub fn new(settings: TimerSettings, clock: Arc<dyn Clock>, alarm: Arc<dyn AlarmSound>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                engine: TimerEngine::new(),
                slot: RecurringSlot::new(),
            })),
            clock,
            alarm,
            settings,
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Cancel any recurring action, then apply a new duration
    fn reconfigure<F>(&self, updater: F) -> Result<(), String>
    where
        F: FnOnce(&mut TimerEngine) -> TimerPhase,
    {
        let mut inner = self.lock()?;
        inner.slot.cancel();
        let previous = updater(&mut inner.engine);

        if previous != TimerPhase::Idle {
            info!("Timer reconfigured while {:?}, now idle", previous);
        }
        info!("Timer set to {} seconds", inner.engine.duration_seconds());
        Ok(())
    }

    pub fn configure(&self, hours: i64, minutes: i64, seconds: i64) -> Result<(), String> {
        self.reconfigure(|engine| engine.configure(hours, minutes, seconds))
    }

    pub fn configure_seconds(&self, total: i64) -> Result<(), String> {
        self.reconfigure(|engine| engine.configure_seconds(total))
    }

    /// Custom duration from a single minute count
    pub fn configure_minutes(&self, total_minutes: i64) -> Result<(), String> {
        self.reconfigure(|engine| engine.configure_minutes(total_minutes))
    }

    pub fn configure_preset(&self, preset: Preset) -> Result<(), String> {
        debug!("Applying preset {:?}", preset);
        self.configure_minutes(preset.minutes())
    }

    /// Start the countdown, rendering through `render` on every tick.
    ///
    /// Returns false when the timer was not idle; a running countdown keeps
    /// its original start time.
    pub fn start(&self, render: Arc<dyn Render>) -> Result<bool, String> {
        let mut inner = self.lock()?;
        if !inner.engine.start(self.clock.now_ms()) {
            debug!("Start ignored while {:?}", inner.engine.phase());
            return Ok(false);
        }

        let generation = inner.slot.arm();
        let task = tokio::spawn(countdown_poll_task(self.clone(), generation, render));
        inner.slot.install(generation, task);

        info!(
            "Timer started with {} seconds remaining",
            inner.engine.remaining_seconds()
        );
        Ok(true)
    }

    /// Halt a running countdown or acknowledge the alarm
    pub fn stop(&self) -> Result<StopOutcome, String> {
        let mut inner = self.lock()?;
        let outcome = inner.engine.stop();
        self.apply_stop(&mut inner, outcome);
        Ok(outcome)
    }

    fn apply_stop(&self, inner: &mut Inner, outcome: StopOutcome) {
        match outcome {
            StopOutcome::Ignored => debug!("Stop ignored, timer already idle"),
            StopOutcome::Stopped => {
                inner.slot.cancel();
                info!(
                    "Timer stopped with {} seconds remaining",
                    inner.engine.remaining_seconds()
                );
            }
            StopOutcome::Alarming => {
                let generation = inner.slot.arm();
                let task = tokio::spawn(alarm_repeat_task(self.clone(), generation));
                inner.slot.install(generation, task);
                info!("Timer expired, alarm sounding");
            }
            StopOutcome::Silenced => {
                inner.slot.cancel();
                info!("Alarm acknowledged");
            }
        }
    }

    /// Render the current remaining time once, under the timer lock so a
    /// concurrent tick cannot be overwritten by an older frame
    pub fn sync(&self, render: &dyn Render) -> Result<(), String> {
        let inner = self.lock()?;
        let fields = inner.engine.fields();
        render.render(fields.hours, fields.minutes, fields.seconds);
        Ok(())
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        Ok(TimerSnapshot::from_engine(&self.lock()?.engine))
    }

    /// One fire of the countdown poll.
    ///
    /// `Ok(None)` means the poll belongs to a cancelled generation. Rendering
    /// happens under the timer lock so a stopped timer never renders again.
    pub(crate) fn poll_tick(
        &self,
        generation: u64,
        render: &dyn Render,
    ) -> Result<Option<PollOutcome>, String> {
        let mut inner = self.lock()?;
        if !inner.slot.is_current(generation) {
            return Ok(None);
        }

        let outcome = inner.engine.poll(self.clock.now_ms());
        match outcome {
            PollOutcome::Tick(fields) => {
                debug!("Tick: {}", fields);
                render.render(fields.hours, fields.minutes, fields.seconds);
            }
            PollOutcome::Expired(fields) => {
                render.render(fields.hours, fields.minutes, fields.seconds);
                self.apply_stop(&mut inner, StopOutcome::Alarming);
            }
            PollOutcome::Waiting | PollOutcome::Inactive => {}
        }
        Ok(Some(outcome))
    }

    /// One fire of the alarm repeat. Returns false once the alarm is over.
    pub(crate) fn ring(&self, generation: u64) -> Result<bool, String> {
        let inner = self.lock()?;
        if !inner.slot.is_current(generation) || !inner.engine.is_alarming() {
            return Ok(false);
        }
        self.alarm.play();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::MonotonicClock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    #[derive(Default)]
    struct CountingAlarm {
        plays: AtomicUsize,
    }

    impl AlarmSound for CountingAlarm {
        fn play(&self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }
    }

    type Frames = Arc<Mutex<Vec<(i64, i64, i64)>>>;

    fn recorder() -> (Frames, Arc<dyn Render>) {
        let frames: Frames = Arc::default();
        let sink = Arc::clone(&frames);
        let render = move |h: i64, m: i64, s: i64| sink.lock().unwrap().push((h, m, s));
        (frames, Arc::new(render))
    }

    fn service() -> (TimerService, Arc<CountingAlarm>) {
        let alarm = Arc::new(CountingAlarm::default());
        let timer = TimerService::new(
            TimerSettings::default(),
            Arc::new(MonotonicClock::new()),
            alarm.clone(),
        );
        (timer, alarm)
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_renders_each_second() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure(0, 1, 0).unwrap();

        assert!(timer.start(render).unwrap());
        sleep(Duration::from_millis(3_050)).await;

        assert_eq!(
            *frames.lock().unwrap(),
            vec![(0, 0, 59), (0, 0, 58), (0, 0, 57)]
        );
        let snapshot = timer.snapshot().unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.remaining_seconds, 57);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_rendering() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure(0, 0, 30).unwrap();

        timer.start(render).unwrap();
        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(timer.stop().unwrap(), StopOutcome::Stopped);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(frames.lock().unwrap().len(), 1);
        assert_eq!(timer.snapshot().unwrap().remaining_seconds, 29);
        assert_eq!(timer.stop().unwrap(), StopOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_ignored() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure(0, 0, 10).unwrap();

        assert!(timer.start(render.clone()).unwrap());
        sleep(Duration::from_millis(600)).await;
        assert!(!timer.start(render).unwrap());
        sleep(Duration::from_millis(500)).await;

        // One poll loop, counting from the first start
        assert_eq!(*frames.lock().unwrap(), vec![(0, 0, 9)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_rings_until_acknowledged() {
        let (timer, alarm) = service();
        let (frames, render) = recorder();
        timer.configure(0, 0, 2).unwrap();

        timer.start(render).unwrap();
        sleep(Duration::from_millis(2_100)).await;
        assert_eq!(timer.snapshot().unwrap().phase, TimerPhase::Alarming);
        assert_eq!(*frames.lock().unwrap(), vec![(0, 0, 1), (0, 0, 0)]);

        sleep(Duration::from_millis(2_900)).await;
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 2);

        assert_eq!(timer.stop().unwrap(), StopOutcome::Silenced);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 2);
        assert_eq!(timer.snapshot().unwrap().phase, TimerPhase::Idle);
        assert_eq!(frames.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_silences_alarm() {
        let (timer, alarm) = service();
        let (_, render) = recorder();
        timer.configure(0, 0, 1).unwrap();

        timer.start(render).unwrap();
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 1);

        timer.configure_preset(Preset::ShortBreak).unwrap();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 1);

        let snapshot = timer.snapshot().unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Idle);
        assert_eq!(snapshot.duration_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop_keeps_single_loop() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure(0, 0, 20).unwrap();

        for _ in 0..3 {
            timer.start(render.clone()).unwrap();
            timer.stop().unwrap();
        }
        timer.start(render).unwrap();
        sleep(Duration::from_millis(1_050)).await;

        assert_eq!(*frames.lock().unwrap(), vec![(0, 0, 19)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_and_start_resumes_countdown() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure(0, 0, 30).unwrap();

        timer.start(render.clone()).unwrap();
        sleep(Duration::from_millis(5_050)).await;
        assert_eq!(timer.stop().unwrap(), StopOutcome::Stopped);
        assert_eq!(timer.snapshot().unwrap().remaining_seconds, 25);

        assert!(timer.start(render).unwrap());
        sleep(Duration::from_millis(2_100)).await;

        let seconds: Vec<i64> = frames.lock().unwrap().iter().map(|f| f.2).collect();
        assert_eq!(seconds, vec![29, 28, 27, 26, 25, 24, 23]);

        let snapshot = timer.snapshot().unwrap();
        assert_eq!(snapshot.remaining_seconds, 23);
        assert_eq!(snapshot.duration_seconds, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_renders_configured_time() {
        let (timer, _) = service();
        let (frames, render) = recorder();
        timer.configure_minutes(90).unwrap();

        timer.sync(render.as_ref()).unwrap();
        assert_eq!(*frames.lock().unwrap(), vec![(1, 30, 0)]);
        assert_eq!(timer.snapshot().unwrap().duration_seconds, 5400);
    }
}
