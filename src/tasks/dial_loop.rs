//! Event loop that owns the dial controller

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    dial::{Bounds, InteractionController, RenderOptions, TickHandle, TickScheduler},
    services::HostHooks,
    state::DialSnapshot,
};

/// Controller as driven by the host loop
pub type DialController = InteractionController<TokioTicks, HostHooks>;

/// Tick source backed by a single tokio interval.
///
/// Cancelling drops the interval, so a cancelled handle can never fire.
#[derive(Debug, Default)]
pub struct TokioTicks {
    next_id: u64,
    armed: Option<(TickHandle, Interval)>,
}

impl TokioTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Wait for the armed interval to fire; pends forever when nothing is armed
    pub async fn next_tick(&mut self) -> TickHandle {
        match &mut self.armed {
            Some((handle, interval)) => {
                interval.tick().await;
                *handle
            }
            None => std::future::pending().await,
        }
    }
}

impl TickScheduler for TokioTicks {
    fn arm_tick(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);

        // First tick one full period from now, not immediately
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.armed = Some((handle, interval));
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if matches!(&self.armed, Some((armed, _)) if *armed == handle) {
            self.armed = None;
        }
    }
}

/// Host input forwarded to the dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DialCommand {
    Press { x: f64, y: f64 },
    DragBegin { x: f64, y: f64 },
    DragUpdate { x: f64, y: f64 },
    DragEnd,
    /// A complete click at one point: press, drag begin, drag end
    Set { x: f64, y: f64 },
    Toggle,
    AddTime,
    RemoveTime,
    StopAlarm,
    Resize { width: f64, height: f64 },
    /// Read the current state without changing it
    Snapshot,
}

impl DialCommand {
    pub fn apply(self, controller: &mut DialController) {
        match self {
            DialCommand::Press { x, y } => controller.on_pointer_press(x, y),
            DialCommand::DragBegin { x, y } => controller.on_drag_begin(x, y),
            DialCommand::DragUpdate { x, y } => controller.on_drag_update(x, y),
            DialCommand::DragEnd => controller.on_drag_end(),
            DialCommand::Set { x, y } => {
                controller.on_pointer_press(x, y);
                controller.on_drag_begin(x, y);
                controller.on_drag_end();
            }
            DialCommand::Toggle => controller.on_toggle(),
            DialCommand::AddTime => controller.on_add_time(),
            DialCommand::RemoveTime => controller.on_remove_time(),
            DialCommand::StopAlarm => controller.hooks_mut().stop_alarm(),
            DialCommand::Resize { width, height } => controller.set_bounds(Bounds::new(width, height)),
            DialCommand::Snapshot => {}
        }
    }
}

/// A command together with the channel its resulting snapshot goes to
#[derive(Debug)]
pub struct DialRequest {
    pub command: DialCommand,
    pub reply: oneshot::Sender<DialSnapshot>,
}

enum LoopEvent {
    Request(DialRequest),
    Tick(TickHandle),
}

fn capture(controller: &DialController, options: RenderOptions) -> DialSnapshot {
    DialSnapshot::capture(
        controller.state(),
        controller.bounds(),
        controller.hooks().alarm().is_ringing(),
        options,
    )
}

/// Run the dial until every command sender is dropped.
///
/// This task is the only owner of the controller: commands and ticks are
/// handled one at a time, and a redraw request results in one new snapshot
/// on `snapshots` per handled event.
pub async fn dial_loop_task(
    mut controller: DialController,
    mut commands: mpsc::Receiver<DialRequest>,
    snapshots: watch::Sender<DialSnapshot>,
    options: RenderOptions,
) {
    info!("Starting dial loop");
    controller.hooks_mut().take_redraw();
    snapshots.send_replace(capture(&controller, options));

    loop {
        let event = tokio::select! {
            request = commands.recv() => match request {
                Some(request) => LoopEvent::Request(request),
                None => break,
            },
            handle = controller.countdown_mut().ticks_mut().next_tick() => LoopEvent::Tick(handle),
        };

        match event {
            LoopEvent::Request(DialRequest { command, reply }) => {
                debug!("Dial command: {:?}", command);
                command.apply(&mut controller);
                if reply.send(capture(&controller, options)).is_err() {
                    debug!("Requester went away before the reply");
                }
            }
            LoopEvent::Tick(handle) => {
                controller.on_tick(handle);
            }
        }

        if controller.hooks_mut().take_redraw() {
            snapshots.send_replace(capture(&controller, options));
        }
    }

    controller.countdown_mut().stop();
    info!("Dial loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::JsonSettings,
        state::{DialEvent, Phase},
    };
    use tokio::sync::broadcast;

    struct Harness {
        commands: mpsc::Sender<DialRequest>,
        snapshots: watch::Receiver<DialSnapshot>,
        events: broadcast::Receiver<DialEvent>,
        dir: tempfile::TempDir,
    }

    impl Harness {
        fn start(persisted: Option<u32>) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let settings = JsonSettings::new(dir.path().join("settings.json"));
            if let Some(total) = persisted {
                settings.save_last_position(total).unwrap();
            }
            let (events_tx, events) = broadcast::channel(16);
            let controller = InteractionController::new(
                TokioTicks::new(),
                HostHooks::new(settings, events_tx),
                Bounds::new(200.0, 200.0),
            );
            let (commands, rx) = mpsc::channel(8);
            let (snapshots_tx, snapshots) = watch::channel(DialSnapshot::default());
            tokio::spawn(dial_loop_task(controller, rx, snapshots_tx, RenderOptions::default()));
            Self {
                commands,
                snapshots,
                events,
                dir,
            }
        }

        async fn send(&self, command: DialCommand) -> DialSnapshot {
            let (reply, rx) = oneshot::channel();
            self.commands.send(DialRequest { command, reply }).await.unwrap();
            rx.await.unwrap()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_to_completion() {
        let mut h = Harness::start(Some(30));
        let snapshot = h.send(DialCommand::Toggle).await;
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.remaining_seconds, 30);
        assert!(matches!(h.events.recv().await, Ok(DialEvent::SessionStarted { .. })));

        time::sleep(Duration::from_millis(10_500)).await;
        let snapshot = h.send(DialCommand::Snapshot).await;
        assert_eq!(snapshot.remaining_seconds, 20);
        assert_eq!(snapshot.label, "00:20");

        time::sleep(Duration::from_secs(25)).await;
        let snapshot = h.send(DialCommand::Snapshot).await;
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert!(snapshot.alarm_ringing);
        assert!(matches!(h.events.recv().await, Ok(DialEvent::SessionFinished { .. })));
        assert!(h.events.try_recv().is_err(), "completion is announced once");

        let snapshot = h.send(DialCommand::StopAlarm).await;
        assert!(!snapshot.alarm_ringing);
        assert!(h.snapshots.has_changed().unwrap());
        assert!(!h.snapshots.borrow_and_update().alarm_ringing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_pauses_countdown() {
        let h = Harness::start(None);
        h.send(DialCommand::Toggle).await;
        time::sleep(Duration::from_millis(3_500)).await;

        // Left of center is 45 minutes
        let snapshot = h.send(DialCommand::Press { x: 20.0, y: 100.0 }).await;
        assert_eq!(snapshot.phase, Phase::Paused);
        assert_eq!(snapshot.total_seconds, 2700);
        assert_eq!(snapshot.remaining_seconds, 2700);

        h.send(DialCommand::DragBegin { x: 20.0, y: 100.0 }).await;
        time::sleep(Duration::from_secs(10)).await;
        let snapshot = h.send(DialCommand::Snapshot).await;
        assert_eq!(snapshot.remaining_seconds, 2700, "no ticks while paused");
        assert!(snapshot.dragging);

        let snapshot = h.send(DialCommand::DragEnd).await;
        assert_eq!(snapshot.phase, Phase::Running);
        time::sleep(Duration::from_millis(2_500)).await;
        let snapshot = h.send(DialCommand::Snapshot).await;
        assert_eq!(snapshot.remaining_seconds, 2698);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_starts_session_and_persists() {
        let h = Harness::start(None);
        let snapshot = h.send(DialCommand::Set { x: 180.0, y: 100.0 }).await;
        assert_eq!(snapshot.total_seconds, 900);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.action, crate::state::TimerAction::Stop);

        let settings = JsonSettings::new(h.dir.path().join("settings.json"));
        assert_eq!(settings.load().unwrap().last_position, Some(900));
    }

    #[tokio::test]
    async fn test_loop_exits_when_senders_drop() {
        let (events_tx, _events) = broadcast::channel(4);
        let dir = tempfile::tempdir().unwrap();
        let controller = InteractionController::new(
            TokioTicks::new(),
            HostHooks::new(JsonSettings::new(dir.path().join("s.json")), events_tx),
            Bounds::new(100.0, 100.0),
        );
        let (commands, rx) = mpsc::channel(1);
        let (snapshots_tx, _snapshots) = watch::channel(DialSnapshot::default());
        let task = tokio::spawn(dial_loop_task(controller, rx, snapshots_tx, RenderOptions::default()));
        drop(commands);
        task.await.unwrap();
    }

    #[test]
    fn test_cancel_ignores_foreign_handle() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _guard = runtime.enter();
        let mut ticks = TokioTicks::new();
        let handle = ticks.arm_tick(Duration::from_secs(1));
        ticks.cancel_tick(TickHandle(handle.0 + 1));
        assert!(ticks.is_armed());
        ticks.cancel_tick(handle);
        assert!(!ticks.is_armed());
    }
}
