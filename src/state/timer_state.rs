//! Timer status snapshot and duration presets

use serde::{Deserialize, Serialize};

use crate::{
    display::DisplayFields,
    timer::{TimerEngine, TimerPhase},
};

/// Point-in-time view of the timer for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub remaining: DisplayFields,
}

impl TimerSnapshot {
    pub fn from_engine(engine: &TimerEngine) -> Self {
        Self {
            phase: engine.phase(),
            duration_seconds: engine.duration_seconds(),
            remaining_seconds: engine.remaining_seconds(),
            remaining: engine.fields(),
        }
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Check if the alarm is sounding
    pub fn is_alarming(&self) -> bool {
        self.phase == TimerPhase::Alarming
    }
}

/// Standard pomodoro lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Preset {
    pub fn minutes(self) -> i64 {
        match self {
            Preset::Pomodoro => 25,
            Preset::ShortBreak => 5,
            Preset::LongBreak => 15,
        }
    }

    /// Look up a preset by its URL name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pomodoro" => Some(Preset::Pomodoro),
            "short-break" => Some(Preset::ShortBreak),
            "long-break" => Some(Preset::LongBreak),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Pomodoro => "pomodoro",
            Preset::ShortBreak => "short-break",
            Preset::LongBreak => "long-break",
        }
    }
}
