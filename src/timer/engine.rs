//! Countdown state machine.
//!
//! Pure logic: every time-dependent call takes the current monotonic
//! milliseconds from the caller, so it runs the same on a live scheduler and
//! in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::display::DisplayFields;

/// Minimum gap between two recomputations of the remaining time
pub const TICK_THRESHOLD_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Alarming,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Alarming => "alarming",
        };
        f.write_str(name)
    }
}

/// Result of a single poll of a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Not running, nothing to do
    Inactive,
    /// Less than a second since the last tick
    Waiting,
    /// Remaining time recomputed, render these fields
    Tick(DisplayFields),
    /// Countdown reached zero and the engine is now alarming
    Expired(DisplayFields),
}

/// Which transition a stop request caused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Already idle
    Ignored,
    /// Running countdown halted with time left
    Stopped,
    /// Running countdown halted at zero, alarm begins
    Alarming,
    /// Alarm acknowledged
    Silenced,
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    duration_seconds: i64,
    remaining_seconds: i64,
    /// Remaining time when the current run started; elapsed time counts
    /// down from here so a stop and start resumes where it left off
    countdown_from_seconds: i64,
    phase: TimerPhase,
    started_at_ms: u64,
    last_tick_ms: u64,
}

impl TimerEngine {
    /// Idle engine with nothing configured
    pub fn new() -> Self {
        Self::with_duration(0)
    }

    pub fn with_duration(seconds: i64) -> Self {
        Self {
            duration_seconds: seconds,
            remaining_seconds: seconds,
            countdown_from_seconds: seconds,
            phase: TimerPhase::Idle,
            started_at_ms: 0,
            last_tick_ms: 0,
        }
    }

    /// Set the countdown length. Components are combined as given, without
    /// validation; totals beyond the i64 range saturate. Always leaves the
    /// engine idle; returns the phase it left.
    pub fn configure(&mut self, hours: i64, minutes: i64, seconds: i64) -> TimerPhase {
        let total = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        self.configure_seconds(total)
    }

    pub fn configure_seconds(&mut self, total: i64) -> TimerPhase {
        let previous = self.phase;
        self.duration_seconds = total;
        self.remaining_seconds = total;
        self.countdown_from_seconds = total;
        self.phase = TimerPhase::Idle;
        previous
    }

    /// Custom duration entry: a total minute count split into hours and minutes
    pub fn configure_minutes(&mut self, total_minutes: i64) -> TimerPhase {
        let hours = total_minutes.div_euclid(60);
        let minutes = total_minutes.rem_euclid(60);
        self.configure(hours, minutes, 0)
    }

    pub fn configure_hours(&mut self, hours: i64) -> TimerPhase {
        self.configure(hours, 0, 0)
    }

    /// Begin counting down from the time still remaining, which is the
    /// configured duration unless a previous run was stopped part way.
    ///
    /// Returns false, leaving the original start time in place, unless idle.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.phase != TimerPhase::Idle {
            return false;
        }
        self.started_at_ms = now_ms;
        self.last_tick_ms = now_ms;
        self.countdown_from_seconds = self.remaining_seconds;
        self.phase = TimerPhase::Running;
        true
    }

    /// One pass of the polling loop.
    ///
    /// Elapsed time is measured from the start instant, so late or skipped
    /// polls never slow the countdown down. The last-tick stamp only gates
    /// how often the remaining time is recomputed.
    pub fn poll(&mut self, now_ms: u64) -> PollOutcome {
        if self.phase != TimerPhase::Running {
            return PollOutcome::Inactive;
        }
        if now_ms.saturating_sub(self.last_tick_ms) < TICK_THRESHOLD_MS {
            return PollOutcome::Waiting;
        }

        let elapsed_seconds = (now_ms.saturating_sub(self.started_at_ms) / 1000) as i64;
        self.remaining_seconds = self
            .countdown_from_seconds
            .saturating_sub(elapsed_seconds)
            .max(0);
        self.last_tick_ms = now_ms;

        let fields = self.fields();
        if self.remaining_seconds <= 0 {
            self.stop();
            PollOutcome::Expired(fields)
        } else {
            PollOutcome::Tick(fields)
        }
    }

    pub fn stop(&mut self) -> StopOutcome {
        match self.phase {
            TimerPhase::Idle => StopOutcome::Ignored,
            TimerPhase::Running if self.remaining_seconds <= 0 => {
                self.remaining_seconds = 0;
                self.phase = TimerPhase::Alarming;
                StopOutcome::Alarming
            }
            TimerPhase::Running => {
                self.phase = TimerPhase::Idle;
                StopOutcome::Stopped
            }
            TimerPhase::Alarming => {
                self.phase = TimerPhase::Idle;
                StopOutcome::Silenced
            }
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn is_alarming(&self) -> bool {
        self.phase == TimerPhase::Alarming
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }

    /// Remaining time, never negative
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds.max(0)
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    /// Remaining time split for the display
    pub fn fields(&self) -> DisplayFields {
        DisplayFields::from_total_seconds(self.remaining_seconds())
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
