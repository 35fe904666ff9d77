//! Background tasks module
//! 
//! The timer's recurring actions and the terminal echo of the display.

pub mod alarm_repeat;
pub mod countdown_poll;
pub mod display_echo;

// Re-export main functions
pub use alarm_repeat::alarm_repeat_task;
pub use countdown_poll::countdown_poll_task;
pub use display_echo::display_echo_task;
