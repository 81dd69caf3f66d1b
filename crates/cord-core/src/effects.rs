//! Host effects: everything the widget asks of its environment.
//!
//! The widget never touches a surface, a clock, or a timer directly. Each
//! entry point returns a short list of `CordEffect`s; a host either matches
//! on them itself or implements [`CordHost`] and calls [`apply_effects`].

use crate::curve::CordGeometry;
use crate::mode::{RevealRequest, TimerId};
use serde::Serialize;
use smallvec::SmallVec;

/// Cursor affordance over the grab target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorHint {
    Grab,
    Grabbing,
}

/// A single request from the widget to its host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CordEffect {
    /// Draw the cord with this geometry.
    Redraw(CordGeometry),
    SetCursor { cursor: CursorHint },
    /// Call `on_frame` on the next animation frame.
    RequestFrame,
    /// Start the circular reveal transition.
    BeginReveal(RevealRequest),
    /// Call `on_timer(timer)` once after `delay_ms`.
    #[serde(rename_all = "camelCase")]
    ScheduleTimeout { timer: TimerId, delay_ms: f64 },
    /// Apply the theme for `dark` and clear all transition styling.
    CommitMode { dark: bool },
}

/// Effects produced by one call; rarely more than four.
pub type Effects = SmallVec<[CordEffect; 4]>;

/// The render-adapter and scheduler interface a host implements.
pub trait CordHost {
    fn draw(&mut self, geometry: &CordGeometry);

    fn set_cursor(&mut self, cursor: CursorHint);

    /// Schedule one frame callback.
    fn request_frame(&mut self);

    fn begin_reveal(&mut self, request: &RevealRequest);

    /// Schedule a single-shot timer.
    fn set_timeout(&mut self, timer: TimerId, delay_ms: f64);

    fn commit_mode(&mut self, dark: bool);
}

/// Dispatch effects to a host, in order.
pub fn apply_effects<H: CordHost + ?Sized>(effects: &[CordEffect], host: &mut H) {
    for effect in effects {
        match effect {
            CordEffect::Redraw(geometry) => host.draw(geometry),
            CordEffect::SetCursor { cursor } => host.set_cursor(*cursor),
            CordEffect::RequestFrame => host.request_frame(),
            CordEffect::BeginReveal(request) => host.begin_reveal(request),
            CordEffect::ScheduleTimeout { timer, delay_ms } => host.set_timeout(*timer, *delay_ms),
            CordEffect::CommitMode { dark } => host.commit_mode(*dark),
        }
    }
}
