//! Pointer and action handling for the dial
//!
//! The controller owns the [`DurationState`] and the
//! [`CountdownScheduler`] and is the only entry point the host calls into.
//! Every entry point is synchronous and must be invoked from the single
//! event loop that also delivers ticks.
//!
//! Gesture contract: a pointer interaction is reported as `on_pointer_press`
//! followed by `on_drag_begin`, any number of `on_drag_update` and a final
//! `on_drag_end`. The running countdown pauses as soon as the gesture starts
//! and resumes (or a new session starts) at drag end.

use tracing::{debug, info};

use super::countdown::{CountdownScheduler, TickHandle, TickOutcome, TickScheduler};
use super::quantizer::{quantize, Bounds};
use crate::state::duration_state::{MAX_TOTAL_SECONDS, MIN_TOTAL_SECONDS, STEP_SECONDS};
use crate::state::DurationState;

/// Collaborators notified by the controller.
///
/// All calls are fire-and-forget; implementations report their own
/// failures.
pub trait DialHooks {
    /// Persisted duration, consulted once when the controller is built
    fn load_initial_total_seconds(&mut self) -> Option<i64> {
        None
    }

    /// Visual output changed
    fn request_redraw(&mut self);

    /// A validated change of the configured duration, for persistence
    fn total_seconds_changed(&mut self, _total_seconds: u32) {}

    /// A countdown started from idle
    fn session_started(&mut self) {}

    /// A countdown was stopped before it ran out
    fn session_stopped(&mut self) {}

    /// A countdown ran out; raised exactly once per countdown
    fn session_complete(&mut self);
}

pub struct InteractionController<T, H> {
    state: DurationState,
    countdown: CountdownScheduler<T>,
    hooks: H,
    bounds: Bounds,
    /// The current drag began on an active session
    drag_from_session: bool,
}

impl<T: TickScheduler, H: DialHooks> InteractionController<T, H> {
    /// Build a controller for a dial of `bounds`, seeding the duration from
    /// the hooks' persisted value when it is valid
    pub fn new(ticks: T, mut hooks: H, bounds: Bounds) -> Self {
        let persisted = hooks.load_initial_total_seconds();
        let state = DurationState::with_persisted(persisted);
        debug!("Dial created with {}s (persisted: {:?})", state.total_seconds(), persisted);

        Self {
            state,
            countdown: CountdownScheduler::new(ticks),
            hooks,
            bounds,
            drag_from_session: false,
        }
    }

    pub fn state(&self) -> &DurationState {
        &self.state
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn countdown(&self) -> &CountdownScheduler<T> {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut CountdownScheduler<T> {
        &mut self.countdown
    }

    /// The widget was resized
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.hooks.request_redraw();
        }
    }

    pub fn on_pointer_press(&mut self, x: f64, y: f64) {
        self.pause_for_gesture();
        self.dial_to(x, y);
    }

    pub fn on_drag_begin(&mut self, x: f64, y: f64) {
        if !self.state.is_dragging() {
            self.drag_from_session = self.state.is_running();
        }
        self.pause_for_gesture();
        self.state.set_dragging(true);
        self.dial_to(x, y);
    }

    pub fn on_drag_update(&mut self, x: f64, y: f64) {
        if self.state.is_dragging() {
            self.dial_to(x, y);
        }
    }

    pub fn on_drag_end(&mut self) {
        if !self.state.is_dragging() {
            return;
        }
        self.state.set_dragging(false);
        let from_session = std::mem::take(&mut self.drag_from_session);

        if self.state.is_paused() {
            self.resume();
        } else if !from_session && !self.state.is_running() && self.state.total_seconds() > 0 {
            self.start();
        }
        self.hooks.request_redraw();
    }

    /// Start an idle session or stop the current one
    pub fn on_toggle(&mut self) {
        if self.state.is_running() {
            self.stop();
        } else if self.state.total_seconds() > 0 {
            self.start();
        }
    }

    pub fn on_add_time(&mut self) {
        if self.state.total_seconds() < MAX_TOTAL_SECONDS {
            self.adjust_total(self.state.total_seconds() + STEP_SECONDS);
        }
    }

    pub fn on_remove_time(&mut self) {
        if self.state.total_seconds() > MIN_TOTAL_SECONDS {
            self.adjust_total(self.state.total_seconds() - STEP_SECONDS);
        }
    }

    /// Deliver a tick armed through the scheduler
    pub fn on_tick(&mut self, handle: TickHandle) -> TickOutcome {
        let outcome = self.countdown.tick(&mut self.state, handle);
        match outcome {
            TickOutcome::Advanced => self.hooks.request_redraw(),
            TickOutcome::Completed => {
                info!("Session of {}s finished", self.state.total_seconds());
                self.hooks.request_redraw();
                self.hooks.session_complete();
            }
            TickOutcome::Ignored => debug!("Dropped stale tick {:?}", handle),
        }
        outcome
    }

    fn start(&mut self) {
        self.state.begin_session();
        self.countdown.start(&self.state);
        info!("Session started for {}s", self.state.total_seconds());
        self.hooks.request_redraw();
        self.hooks.session_started();
    }

    fn stop(&mut self) {
        self.countdown.stop();
        self.state.end_session();
        info!("Session stopped");
        self.hooks.request_redraw();
        self.hooks.session_stopped();
    }

    fn pause_for_gesture(&mut self) {
        if self.state.is_ticking() && !self.state.is_dragging() {
            self.countdown.pause();
            self.state.set_paused(true);
            debug!("Countdown paused at {}s", self.state.remaining().as_secs());
            self.hooks.request_redraw();
        }
    }

    fn resume(&mut self) {
        self.state.set_paused(false);
        if self.state.remaining().is_zero() {
            self.stop();
            return;
        }
        self.countdown.start(&self.state);
        debug!("Countdown resumed at {}s", self.state.remaining().as_secs());
    }

    fn dial_to(&mut self, x: f64, y: f64) {
        let Some(total) = quantize(x, y, self.bounds) else {
            return;
        };
        if !self.state.set_total_seconds(total) {
            return;
        }
        if self.state.is_paused() {
            self.state.rebase_remaining();
        }
        debug!("Dial set to {}s", total);
        self.hooks.request_redraw();
        self.hooks.total_seconds_changed(total);
    }

    fn adjust_total(&mut self, total: u32) {
        if !self.state.set_total_seconds(total) {
            return;
        }
        if self.state.is_running() {
            self.state.rebase_remaining();
        }
        debug!("Duration adjusted to {}s", total);
        self.hooks.request_redraw();
        self.hooks.total_seconds_changed(total);
    }
}
