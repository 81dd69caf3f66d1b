//! Drag gestures: pointer input → constrained handle position.
//!
//! A `GestureSession` lives from pointer-down to pointer-up. While it is
//! active the handle follows the pointer, with:
//!
//! - a grab offset that decays geometrically on every move, so the handle
//!   re-centres under the pointer;
//! - the handle never rising above the anchor;
//! - a rubber-band mapping once the pointer pulls past rest length;
//! - a one-shot toggle when the raw pull first exceeds the toggle threshold.

use crate::config::CordConfig;
use crate::geometry::{radial, rubber_band};
use crate::model::HandleState;
use crate::physics::release_velocity;
use kurbo::{Point, Vec2};

/// Per-drag state, created on pointer-down and dropped on release.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Pointer position minus handle centre; decays toward zero.
    grab_offset: Vec2,
    moved: bool,
    crossed_threshold: bool,
}

/// Outcome of a single pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Unclamped pointer distance from the anchor.
    pub raw_distance: f64,
    /// `true` on the one move that first crossed the toggle threshold.
    pub toggle: bool,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No movement: hand the handle to the click animation.
    Click,
    /// The handle was dragged: free physics takes over with this velocity.
    Fling { velocity: Vec2 },
}

impl GestureSession {
    /// Begin a drag with the pointer at `pointer`.
    pub fn start(pointer: Point, handle: &HandleState) -> Self {
        Self {
            grab_offset: pointer - handle.position,
            moved: false,
            crossed_threshold: false,
        }
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn crossed_threshold(&self) -> bool {
        self.crossed_threshold
    }

    pub fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    /// Move the handle to follow `pointer`.
    pub fn update(
        &mut self,
        config: &CordConfig,
        handle: &mut HandleState,
        pointer: Point,
    ) -> DragUpdate {
        self.moved = true;
        self.grab_offset *= 1.0 - config.grab_offset_decay;

        let mut target = pointer - self.grab_offset;
        target.y = target.y.max(config.anchor.y);

        let (direction, raw_distance) = radial(config.anchor, target);

        let toggle = raw_distance > config.toggle_threshold && !self.crossed_threshold;
        if toggle {
            self.crossed_threshold = true;
            log::debug!("drag crossed toggle threshold at {raw_distance:.1}");
        }

        handle.position = if raw_distance > config.rest_length {
            let actual = rubber_band(raw_distance, config.rest_length, config.max_stretch());
            config.anchor + direction * actual
        } else {
            target
        };
        handle.velocity = Vec2::ZERO;

        DragUpdate {
            raw_distance,
            toggle,
        }
    }

    /// Resolve the session on pointer-up.
    pub fn end(self, config: &CordConfig, handle: &HandleState) -> Release {
        if !self.moved {
            return Release::Click;
        }
        Release::Fling {
            velocity: release_velocity(config, handle),
        }
    }
}
