//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::timer::TimerSettings;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "tomato-clock")]
#[command(about = "A pomodoro countdown timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial countdown length in minutes
    #[arg(short, long, default_value = "25")]
    pub minutes: i64,

    /// Countdown poll period in milliseconds
    #[arg(long, default_value = "16")]
    pub poll_ms: u64,

    /// Pause between alarm sounds in milliseconds
    #[arg(long, default_value = "1200")]
    pub alarm_interval_ms: u64,

    /// Shell command that plays one alarm sound (terminal bell if unset)
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Print the display to stdout whenever it changes
    #[arg(short, long)]
    pub echo: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Recurring action periods; zero periods fall back to one millisecond
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            poll_interval: Duration::from_millis(self.poll_ms.max(1)),
            alarm_interval: Duration::from_millis(self.alarm_interval_ms.max(1)),
        }
    }

    /// First word of the alarm command, used to probe that it exists
    pub fn alarm_program(&self) -> Option<&str> {
        self.alarm_command
            .as_deref()
            .and_then(|command| command.split_whitespace().next())
    }
}
