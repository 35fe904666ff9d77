//! Alarm sound players

use std::io::Write;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::timer::AlarmSound;

/// Rings the terminal bell on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AlarmSound for TerminalBell {
    fn play(&self) {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

/// Runs a shell command for every alarm cycle, e.g. `paplay bell.oga`
#[derive(Debug, Clone)]
pub struct CommandAlarm {
    command: String,
}

impl CommandAlarm {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl AlarmSound for CommandAlarm {
    /// Spawns the command and returns at once. Must be called from within a
    /// tokio runtime.
    fn play(&self) {
        debug!("Playing alarm: {}", self.command);

        let child = Command::new("sh").arg("-c").arg(&self.command).spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn alarm command: {}", e);
                return;
            }
        };

        let command = self.command.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {}
                Ok(status) => warn!("Alarm command `{}` exited with {}", command, status),
                Err(e) => warn!("Failed to wait for alarm command: {}", e),
            }
        });
    }
}

/// Check that the program behind an alarm command can be executed
pub async fn check_command_available(program: &str) -> Result<(), String> {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {}", program))
        .output()
        .await
        .map_err(|e| format!("Failed to probe for {}: {}", program, e))
        .and_then(|output| {
            if output.status.success() {
                Ok(())
            } else {
                Err(format!("{} is not available on this system", program))
            }
        })?;

    info!("{} is available", program);
    Ok(())
}
