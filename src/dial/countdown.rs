//! Countdown scheduling on top of a host-provided tick source

use std::time::Duration;

use tracing::debug;

use crate::state::DurationState;

/// Spacing between two countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Identifies one armed periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Host side of the timer: arms and cancels a repeating tick.
///
/// An armed tick is delivered back through
/// [`InteractionController::on_tick`](crate::dial::InteractionController::on_tick)
/// with the handle returned here, on the same event loop that drives the
/// controller. After `cancel_tick` returns, the host must not deliver that
/// handle again.
pub trait TickScheduler {
    fn arm_tick(&mut self, interval: Duration) -> TickHandle;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second consumed, countdown continues
    Advanced,
    /// The countdown reached zero and the session is over
    Completed,
    /// Handle was cancelled or state is not ticking; nothing changed
    Ignored,
}

/// Owns the single outstanding tick of the countdown
#[derive(Debug)]
pub struct CountdownScheduler<T> {
    ticks: T,
    armed: Option<TickHandle>,
}

impl<T: TickScheduler> CountdownScheduler<T> {
    pub fn new(ticks: T) -> Self {
        Self { ticks, armed: None }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed_handle(&self) -> Option<TickHandle> {
        self.armed
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Arm the periodic tick for a ticking state.
    ///
    /// Callers go through `Idle -> Running` or `Paused -> Running`, both of
    /// which leave nothing armed.
    pub fn start(&mut self, state: &DurationState) {
        debug_assert!(self.armed.is_none(), "countdown tick armed twice");
        if self.armed.is_some() || !state.is_ticking() || state.remaining().is_zero() {
            return;
        }
        let handle = self.ticks.arm_tick(TICK_INTERVAL);
        debug!("Armed countdown tick {:?} with {}s remaining", handle, state.remaining().as_secs());
        self.armed = Some(handle);
    }

    /// Cancel the outstanding tick, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.armed.take() {
            debug!("Cancelled countdown tick {:?}", handle);
            self.ticks.cancel_tick(handle);
        }
    }

    /// Suspend ticking; `remaining` is left to the caller to preserve
    pub fn pause(&mut self) {
        self.stop();
    }

    /// Advance the countdown by one second for a tick fired on `handle`.
    ///
    /// Reaching zero ends the session and cancels the tick, so the
    /// completion is reported exactly once per countdown.
    pub fn tick(&mut self, state: &mut DurationState, handle: TickHandle) -> TickOutcome {
        if self.armed != Some(handle) || !state.is_ticking() {
            return TickOutcome::Ignored;
        }

        if state.consume_second().is_zero() {
            state.end_session();
            self.stop();
            return TickOutcome::Completed;
        }

        TickOutcome::Advanced
    }
}
