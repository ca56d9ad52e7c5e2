//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, warn};

use super::{DialEvent, DialSnapshot};
use crate::{
    dial::{Bounds, InteractionController, RenderOptions},
    services::{HostHooks, JsonSettings},
    tasks::{dial_loop_task, notifier_task, DialCommand, DialRequest, TokioTicks},
};

/// Shared handle the HTTP layer uses to reach the dial loop
#[derive(Debug)]
pub struct AppState {
    /// Requests for the dial loop, which owns the controller
    pub commands: mpsc::Sender<DialRequest>,
    /// Latest published dial snapshot
    pub snapshots: watch::Receiver<DialSnapshot>,
    /// Channel for session notifications
    pub events: broadcast::Sender<DialEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        commands: mpsc::Sender<DialRequest>,
        snapshots: watch::Receiver<DialSnapshot>,
        events: broadcast::Sender<DialEvent>,
    ) -> Self {
        Self {
            commands,
            snapshots,
            events,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Build the dial controller and spawn its loop and the notifier on
    /// the current runtime
    pub fn launch(
        port: u16,
        host: String,
        settings: JsonSettings,
        bounds: Bounds,
        options: RenderOptions,
    ) -> Self {
        let (events, events_rx) = broadcast::channel(100);
        let (commands, commands_rx) = mpsc::channel(64);
        let (snapshots_tx, snapshots) = watch::channel(DialSnapshot::default());

        let controller = InteractionController::new(
            TokioTicks::new(),
            HostHooks::new(settings, events.clone()),
            bounds,
        );

        tokio::spawn(dial_loop_task(controller, commands_rx, snapshots_tx, options));
        tokio::spawn(notifier_task(events_rx));

        Self::new(port, host, commands, snapshots, events)
    }

    /// Send a command to the dial loop and wait for the resulting snapshot
    pub async fn dispatch(&self, action: &str, command: DialCommand) -> Result<DialSnapshot, String> {
        let (reply, reply_rx) = oneshot::channel();
        self.commands
            .send(DialRequest { command, reply })
            .await
            .map_err(|e| format!("Dial loop is not running: {}", e))?;

        let snapshot = reply_rx
            .await
            .map_err(|e| format!("Dial loop dropped the request: {}", e))?;

        if command != DialCommand::Snapshot {
            debug!("Action {} applied", action);
            self.record_action(action);
        }

        Ok(snapshot)
    }

    /// Latest snapshot published by the dial loop, without a round trip
    pub fn latest_snapshot(&self) -> DialSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DialEvent> {
        self.events.subscribe()
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
