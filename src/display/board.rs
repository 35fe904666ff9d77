//! The display surface the countdown renders to

use std::sync::Mutex;
use tokio::sync::watch;
use tracing::warn;

use super::format::DisplayFields;
use crate::timer::Render;

/// Latest rendered time, published to watchers on every change
#[derive(Debug)]
pub struct TimerDisplay {
    fields: Mutex<DisplayFields>,
    text_tx: watch::Sender<String>,
}

impl TimerDisplay {
    pub fn new() -> Self {
        let fields = DisplayFields::default();
        let (text_tx, _) = watch::channel(fields.to_string());
        Self {
            fields: Mutex::new(fields),
            text_tx,
        }
    }

    /// Current display string
    pub fn text(&self) -> String {
        self.text_tx.borrow().clone()
    }

    /// Fields behind the current display string
    pub fn fields(&self) -> DisplayFields {
        self.fields
            .lock()
            .map(|fields| *fields)
            .unwrap_or_default()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text_tx.subscribe()
    }
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for TimerDisplay {
    fn render(&self, hours: i64, minutes: i64, seconds: i64) {
        let fields = DisplayFields::clamped(hours, minutes, seconds);
        match self.fields.lock() {
            Ok(mut current) => *current = fields,
            Err(e) => warn!("Failed to lock display fields: {}", e),
        }
        // send_replace keeps the value even with no receivers attached
        self.text_tx.send_replace(fields.to_string());
    }
}
