//! Echoes display changes to the terminal

use tokio::sync::watch;
use tracing::{debug, info};

/// Prints every new display string to stdout until the display is dropped
pub async fn display_echo_task(mut display_rx: watch::Receiver<String>) {
    info!("Starting display echo task");

    loop {
        let current = display_rx.borrow_and_update().clone();
        println!("{}", current);

        if display_rx.changed().await.is_err() {
            debug!("Display closed, stopping echo");
            break;
        }
    }
}
