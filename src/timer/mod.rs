//! Countdown timer module
//! 
//! The pure countdown engine, its clock, and the scheduler that drives it.

pub mod clock;
pub mod engine;
pub mod render;
pub mod schedule;
pub mod service;

// Re-export main types
pub use clock::{Clock, MonotonicClock};
pub use engine::{PollOutcome, StopOutcome, TimerEngine, TimerPhase};
pub use render::{AlarmSound, Render};
pub use service::{TimerService, TimerSettings};
