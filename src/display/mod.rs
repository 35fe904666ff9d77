//! Display module
//! 
//! Formatting of remaining time and the display surface the timer renders to.

pub mod board;
pub mod format;

pub use board::TimerDisplay;
pub use format::{format_clock, format_seconds, DisplayFields};
