//! Tomato Clock - A drift-resistant pomodoro countdown timer
//! 
//! This is the main entry point for the tomato-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tomato_clock::{
    api::create_router,
    config::Config,
    services::{check_command_available, CommandAlarm, TerminalBell},
    state::AppState,
    tasks::display_echo_task,
    timer::{AlarmSound, MonotonicClock, TimerService},
    utils::shutdown_signal,
};

/// Pick the alarm player, falling back to the terminal bell
async fn build_alarm(config: &Config) -> Arc<dyn AlarmSound> {
    let (Some(command), Some(program)) = (config.alarm_command.as_deref(), config.alarm_program()) else {
        info!("Using terminal bell for the alarm");
        return Arc::new(TerminalBell);
    };

    match check_command_available(program).await {
        Ok(()) => {
            info!("Using `{}` for the alarm", command);
            Arc::new(CommandAlarm::new(command))
        }
        Err(e) => {
            warn!("{}, falling back to terminal bell", e);
            Arc::new(TerminalBell)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato_clock={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting tomato-clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, initial={}min",
          config.host, config.port, config.minutes);

    let alarm = build_alarm(&config).await;
    let timer = TimerService::new(config.timer_settings(), Arc::new(MonotonicClock::new()), alarm);
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer));

    state
        .configure_custom(config.minutes)
        .map_err(anyhow::Error::msg)?;

    if config.echo {
        tokio::spawn(display_echo_task(state.display.subscribe()));
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start         - Start the countdown");
    info!("  POST /timer/stop          - Stop the countdown or silence the alarm");
    info!("  POST /timer/configure     - Set {{hours, minutes, seconds}}");
    info!("  POST /timer/custom        - Set {{minutes}}");
    info!("  POST /timer/preset/:name  - pomodoro, short-break, long-break");
    info!("  GET  /status              - Current timer and display");
    info!("  GET  /health              - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            if let Err(e) = signal {
                tracing::error!("Failed to listen for shutdown signals: {}", e);
            }
            info!("Shutdown signal received");
        }
    }

    // Silence a sounding alarm and cancel any pending poll
    if let Err(e) = state.timer.configure_seconds(0) {
        warn!("Failed to reset timer on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
