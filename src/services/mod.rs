//! External side effects module
//! 
//! Alarm sound players the timer invokes when a countdown expires.

pub mod alarm;

// Re-export main types
pub use alarm::{check_command_available, CommandAlarm, TerminalBell};
