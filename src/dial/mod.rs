//! Dial interaction and countdown engine
//!
//! Pointer geometry, the countdown scheduler, the gesture controller and
//! the arc renderer. Nothing in here performs I/O; the host plugs in
//! through [`TickScheduler`] and [`DialHooks`].

pub mod controller;
pub mod countdown;
pub mod quantizer;
pub mod renderer;

pub use controller::{DialHooks, InteractionController};
pub use countdown::{CountdownScheduler, TickHandle, TickOutcome, TickScheduler, TICK_INTERVAL};
pub use quantizer::{quantize, Bounds};
pub use renderer::{render, render_with, ColorSlot, Point, Primitive, RenderOptions};
