//! Tomato Clock - A drift-resistant pomodoro countdown timer
//! 
//! This library provides the countdown engine, the clock-face formatter the
//! countdown renders through, and a small HTTP surface to drive them.

pub mod api;
pub mod config;
pub mod display;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use display::{format_clock, DisplayFields, TimerDisplay};
pub use state::AppState;
pub use timer::{TimerEngine, TimerPhase, TimerService, TimerSettings};
pub use utils::signals::shutdown_signal;
