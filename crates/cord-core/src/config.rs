//! Widget constants fixed at construction.
//!
//! Every tunable of the cord lives in `CordConfig`. Hosts may pass a partial
//! JSON object; missing fields fall back to the defaults below.

use crate::model::Color;
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Viewport ─────────────────────────────────────────────────────────────

/// The host viewport dimensions, used to size the reveal circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Radius that covers the viewport from any anchor near its top edge.
    pub fn reveal_radius(&self) -> f64 {
        self.width.max(self.height) * 3.0 / 2.0
    }
}

// ─── Easing ───────────────────────────────────────────────────────────────

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierEasing {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezierEasing {
    /// easeInQuart approximation.
    pub const EASE_IN_QUART: Self = Self {
        x1: 0.5,
        y1: 0.0,
        x2: 0.75,
        y2: 0.0,
    };

    pub fn to_css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

// ─── Config ───────────────────────────────────────────────────────────────

/// Physical and timing constants of the cord.
///
/// Lengths are in widget-local units (SVG user space), physics constants are
/// per frame, durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CordConfig {
    /// Fixed end of the cord.
    pub anchor: Point,
    /// Natural, unstretched cord length.
    pub rest_length: f64,
    /// Hard cap on the stretched length; the rubber band approaches it
    /// asymptotically.
    pub max_length: f64,
    /// Raw drag distance beyond which a drag toggles the mode.
    pub toggle_threshold: f64,

    pub handle_radius: f64,
    /// Radius of the invisible grab target around the handle.
    pub hit_radius: f64,
    pub cord_width: f64,

    pub gravity: f64,
    /// Per-frame velocity multiplier, strictly between 0 and 1.
    pub damping: f64,
    /// Release velocity per unit of stretch.
    pub snap_back_factor: f64,
    /// Fraction of the grab offset removed on every pointer move.
    pub grab_offset_decay: f64,

    pub settle_velocity_epsilon: f64,
    pub settle_position_epsilon: f64,
    /// Upper bound on physics steps before the handle is snapped to rest.
    pub max_settle_steps: u32,

    /// Slack distance over which the curve blends from straight to draped.
    pub slack_transition_zone: f64,
    pub drape_factor: f64,

    /// Vertical pull distance of the click animation, measured from the anchor.
    pub click_pull_distance: f64,
    pub click_pull_down_ms: f64,
    pub click_pull_up_ms: f64,

    pub reveal_duration_ms: f64,
    pub reveal_easing: CubicBezierEasing,
    /// Seed radius of the reveal circle, centred this far above the anchor.
    pub reveal_start_offset: f64,

    pub light_color: Color,
    pub dark_color: Color,
}

impl Default for CordConfig {
    fn default() -> Self {
        Self {
            anchor: Point::new(50.0, 0.0),
            rest_length: 50.0,
            max_length: 100.0,
            toggle_threshold: 75.0,
            handle_radius: 5.0,
            hit_radius: 20.0,
            cord_width: 1.5,
            gravity: 0.4,
            damping: 0.95,
            snap_back_factor: 0.2,
            grab_offset_decay: 0.1,
            settle_velocity_epsilon: 0.05,
            settle_position_epsilon: 0.5,
            max_settle_steps: 2000,
            slack_transition_zone: 10.0,
            drape_factor: 0.7,
            click_pull_distance: 75.0,
            click_pull_down_ms: 75.0,
            click_pull_up_ms: 150.0,
            reveal_duration_ms: 500.0,
            reveal_easing: CubicBezierEasing::EASE_IN_QUART,
            reveal_start_offset: 50.0,
            light_color: Color::rgb8(0xF3, 0xF4, 0xF5),
            dark_color: Color::rgb8(0x1D, 0x1D, 0x1F),
        }
    }
}

impl CordConfig {
    /// Stretch headroom beyond rest length.
    pub fn max_stretch(&self) -> f64 {
        self.max_length - self.rest_length
    }

    /// The point the handle hangs at when settled.
    pub fn rest_position(&self) -> Point {
        Point::new(self.anchor.x, self.anchor.y + self.rest_length)
    }

    /// Check that the constants describe a cord the simulation can settle.
    ///
    /// # Errors
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("anchor.x", self.anchor.x),
            ("anchor.y", self.anchor.y),
            ("rest_length", self.rest_length),
            ("max_length", self.max_length),
            ("toggle_threshold", self.toggle_threshold),
            ("handle_radius", self.handle_radius),
            ("hit_radius", self.hit_radius),
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("snap_back_factor", self.snap_back_factor),
            ("grab_offset_decay", self.grab_offset_decay),
            ("settle_velocity_epsilon", self.settle_velocity_epsilon),
            ("settle_position_epsilon", self.settle_position_epsilon),
            ("slack_transition_zone", self.slack_transition_zone),
            ("drape_factor", self.drape_factor),
            ("click_pull_distance", self.click_pull_distance),
            ("click_pull_down_ms", self.click_pull_down_ms),
            ("click_pull_up_ms", self.click_pull_up_ms),
            ("reveal_duration_ms", self.reveal_duration_ms),
            ("reveal_start_offset", self.reveal_start_offset),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite"));
        }

        if self.rest_length <= 0.0 {
            return Err("rest_length must be positive".to_string());
        }
        if self.max_length <= self.rest_length {
            return Err(format!(
                "max_length ({}) must exceed rest_length ({})",
                self.max_length, self.rest_length
            ));
        }
        if self.click_pull_distance < self.toggle_threshold {
            return Err(format!(
                "click_pull_distance ({}) must reach toggle_threshold ({})",
                self.click_pull_distance, self.toggle_threshold
            ));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(format!("damping must be in (0, 1), got {}", self.damping));
        }
        if self.gravity < 0.0 {
            return Err("gravity must not be negative".to_string());
        }
        if !(0.0..1.0).contains(&self.grab_offset_decay) {
            return Err("grab_offset_decay must be in [0, 1)".to_string());
        }
        if self.slack_transition_zone <= 0.0 {
            return Err("slack_transition_zone must be positive".to_string());
        }
        if self.settle_velocity_epsilon <= 0.0 || self.settle_position_epsilon <= 0.0 {
            return Err("settle epsilons must be positive".to_string());
        }
        if self.max_settle_steps == 0 {
            return Err("max_settle_steps must be at least 1".to_string());
        }
        for (name, ms) in [
            ("click_pull_down_ms", self.click_pull_down_ms),
            ("click_pull_up_ms", self.click_pull_up_ms),
            ("reveal_duration_ms", self.reveal_duration_ms),
        ] {
            if ms <= 0.0 {
                return Err(format!("{name} must be positive"));
            }
        }
        Ok(())
    }
}
