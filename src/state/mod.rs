//! State management module
//! 
//! Application state shared with the HTTP handlers, plus timer status types.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Preset, TimerSnapshot};
