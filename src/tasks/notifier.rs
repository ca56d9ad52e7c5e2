//! Session notification background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::state::DialEvent;

/// Background task that turns dial events into user-facing notifications
pub async fn notifier_task(mut events: broadcast::Receiver<DialEvent>) {
    info!("Starting notifier task");

    loop {
        match events.recv().await {
            Ok(DialEvent::SessionFinished { at }) => {
                info!(
                    "Session finished at {}. Stop the alarm with POST /alarm/stop",
                    at.format("%H:%M:%S")
                );
            }
            Ok(event) => {
                debug!("Dial event: {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notifier lagged behind, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Event channel closed, stopping notifier");
                break;
            }
        }
    }
}
