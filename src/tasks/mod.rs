//! Background tasks module
//! 
//! This module contains the tasks that run alongside the HTTP server: the
//! dial event loop and the notifier.

pub mod dial_loop;
pub mod notifier;

// Re-export main items
pub use dial_loop::{dial_loop_task, DialCommand, DialController, DialRequest, TokioTicks};
pub use notifier::notifier_task;
