//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{Preset, TimerSnapshot};
use crate::{
    display::TimerDisplay,
    timer::{Render, StopOutcome, TimerService},
};

/// Main application state: the timer, the display it renders to, and
/// server metadata
#[derive(Debug)]
pub struct AppState {
    pub timer: TimerService,
    pub display: Arc<TimerDisplay>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around an explicitly constructed timer
    pub fn new(port: u16, host: String, timer: TimerService) -> Self {
        Self {
            timer,
            display: Arc::new(TimerDisplay::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Push the configured time to the display
    fn sync_display(&self) -> Result<TimerSnapshot, String> {
        self.timer.sync(self.display.as_ref())?;
        self.timer.snapshot()
    }

    /// Set the timer from hours, minutes and seconds
    pub fn configure(&self, hours: i64, minutes: i64, seconds: i64) -> Result<TimerSnapshot, String> {
        info!("Configuring timer to {}h {}m {}s", hours, minutes, seconds);
        self.timer.configure(hours, minutes, seconds)?;
        self.record_action("configure");
        self.sync_display()
    }

    /// Set the timer from a custom total minute count
    pub fn configure_custom(&self, total_minutes: i64) -> Result<TimerSnapshot, String> {
        info!("Configuring custom timer of {} minutes", total_minutes);
        self.timer.configure_minutes(total_minutes)?;
        self.record_action("custom");
        self.sync_display()
    }

    pub fn apply_preset(&self, preset: Preset) -> Result<TimerSnapshot, String> {
        info!("Setting timer for {}", preset.name());
        self.timer.configure_preset(preset)?;
        self.record_action(preset.name());
        self.sync_display()
    }

    /// Start the countdown, rendering to the display
    pub fn start(&self) -> Result<bool, String> {
        let render: Arc<dyn Render> = self.display.clone();
        let started = self.timer.start(render)?;
        self.record_action("start");
        Ok(started)
    }

    /// Stop the countdown or acknowledge the alarm
    pub fn stop(&self) -> Result<StopOutcome, String> {
        let outcome = self.timer.stop()?;
        self.record_action("stop");
        Ok(outcome)
    }

    pub fn get_timer_state(&self) -> Result<TimerSnapshot, String> {
        self.timer.snapshot()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
