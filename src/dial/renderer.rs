//! Dial drawing primitives
//!
//! Rendering is a pure function of the duration state. Coordinates are in
//! pixels relative to the dial center with y growing downwards; angles are
//! radians measured clockwise from 12 o'clock. Concrete colors are left to
//! the host, which maps each [`ColorSlot`] onto its theme.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::dial::quantizer::Bounds;
use crate::state::duration_state::MAX_TOTAL_SECONDS;
use crate::state::DurationState;

/// Width of the track and progress strokes
pub const STROKE_WIDTH: f64 = 10.0;
/// Radius of the handle disc at the end of the arc
pub const HANDLE_RADIUS: f64 = 8.0;
/// Gap between the widget edge and the track
pub const DIAL_MARGIN: f64 = 15.0;
/// Distance of the high-contrast outlines from the track center line
pub const BORDER_OFFSET: f64 = 5.0;
/// Stroke width of high-contrast outlines
pub const BORDER_WIDTH: f64 = 1.0;

const ACTIVE_FILL_OPACITY: f64 = 0.3;
const IDLE_FILL_OPACITY: f64 = 0.2;

/// Semantic color slots resolved by the host theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSlot {
    /// Neutral gray of the empty track
    Track,
    /// Configured duration while not counting down
    Accent,
    /// Remaining time of an active countdown
    Alert,
    /// Gray wedge behind a configured, idle duration
    NeutralFill,
    /// Foreground-derived outline used in high contrast mode
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Point on a circle of `radius` around the origin at `angle`
    pub fn on_circle(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.sin(),
            y: -radius * angle.cos(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Stroked full circle
    Circle {
        center: Point,
        radius: f64,
        stroke_width: f64,
        color: ColorSlot,
    },
    /// Filled pie slice from the center out to the arc
    Wedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: ColorSlot,
        opacity: f64,
    },
    /// Stroked arc along the track
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke_width: f64,
        round_caps: bool,
        color: ColorSlot,
    },
    /// Filled disc
    Disc {
        center: Point,
        radius: f64,
        color: ColorSlot,
    },
}

/// Host-side rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub high_contrast: bool,
}

/// Track radius for a widget of the given size
pub fn dial_radius(bounds: Bounds) -> f64 {
    if bounds.is_degenerate() {
        return 0.0;
    }
    (bounds.width.min(bounds.height) / 2.0 - DIAL_MARGIN).max(0.0)
}

/// Primitives for `state` on a track of `radius`
pub fn render(state: &DurationState, radius: f64) -> Vec<Primitive> {
    render_with(state, radius, RenderOptions::default())
}

pub fn render_with(state: &DurationState, radius: f64, options: RenderOptions) -> Vec<Primitive> {
    let mut frame = vec![Primitive::Circle {
        center: Point::ORIGIN,
        radius,
        stroke_width: STROKE_WIDTH,
        color: ColorSlot::Track,
    }];
    if options.high_contrast {
        frame.push(outline_circle(radius + BORDER_OFFSET));
        frame.push(outline_circle(radius - BORDER_OFFSET));
    }

    let total = state.total_seconds();
    if total == 0 {
        return frame;
    }

    let progress = f64::from(total) / f64::from(MAX_TOTAL_SECONDS);
    let counting = state.is_running() && !state.remaining().is_zero();

    let (sweep, line, fill, opacity) = if counting {
        let ratio = state.remaining().as_secs_f64() / f64::from(total);
        (progress * ratio * TAU, ColorSlot::Alert, ColorSlot::Alert, ACTIVE_FILL_OPACITY)
    } else {
        (progress * TAU, ColorSlot::Accent, ColorSlot::NeutralFill, IDLE_FILL_OPACITY)
    };

    frame.push(Primitive::Wedge {
        center: Point::ORIGIN,
        radius,
        start_angle: 0.0,
        end_angle: sweep,
        color: fill,
        opacity,
    });
    frame.push(Primitive::Arc {
        center: Point::ORIGIN,
        radius,
        start_angle: 0.0,
        end_angle: sweep,
        stroke_width: STROKE_WIDTH,
        round_caps: true,
        color: line,
    });

    if options.high_contrast {
        frame.push(outline_arc(radius + BORDER_OFFSET, sweep));
        frame.push(outline_arc(radius - BORDER_OFFSET, sweep));
    }

    let handle = Point::on_circle(radius, sweep);
    frame.push(Primitive::Disc {
        center: handle,
        radius: HANDLE_RADIUS,
        color: line,
    });
    if options.high_contrast {
        frame.push(Primitive::Circle {
            center: handle,
            radius: HANDLE_RADIUS,
            stroke_width: BORDER_WIDTH,
            color: ColorSlot::Border,
        });
    }

    frame
}

fn outline_circle(radius: f64) -> Primitive {
    Primitive::Circle {
        center: Point::ORIGIN,
        radius,
        stroke_width: BORDER_WIDTH,
        color: ColorSlot::Border,
    }
}

fn outline_arc(radius: f64, sweep: f64) -> Primitive {
    Primitive::Arc {
        center: Point::ORIGIN,
        radius,
        start_angle: 0.0,
        end_angle: sweep,
        stroke_width: BORDER_WIDTH,
        round_caps: false,
        color: ColorSlot::Border,
    }
}
