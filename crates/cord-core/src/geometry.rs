//! Shared geometric helpers: radial direction and rubber-band stretch.

use kurbo::{Point, Vec2};

/// Below this distance the handle is treated as coincident with the anchor.
pub const COINCIDENT_EPSILON: f64 = 1e-9;

/// Fallback direction for a handle sitting on the anchor: straight down.
pub const DEFAULT_DIRECTION: Vec2 = Vec2::new(0.0, 1.0);

/// Unit direction and distance from `anchor` to `point`.
///
/// A point coincident with the anchor yields `DEFAULT_DIRECTION` and a
/// distance of zero instead of dividing by zero.
pub fn radial(anchor: Point, point: Point) -> (Vec2, f64) {
    let delta = point - anchor;
    let distance = delta.hypot();
    if distance < COINCIDENT_EPSILON || !distance.is_finite() {
        return (DEFAULT_DIRECTION, 0.0);
    }
    (delta / distance, distance)
}

/// Map a raw distance beyond rest length onto the visible cord length.
///
/// `rest + max_stretch * (1 - e^(-(raw - rest) / max_stretch))`: identity at
/// rest length, strictly increasing, and always below `rest + max_stretch`.
/// Distances at or below rest length are returned unchanged.
pub fn rubber_band(raw_distance: f64, rest_length: f64, max_stretch: f64) -> f64 {
    if raw_distance <= rest_length {
        return raw_distance;
    }
    let cap = rest_length + max_stretch;
    let stretch = raw_distance - rest_length;
    let actual = rest_length + max_stretch * (1.0 - (-stretch / max_stretch).exp());
    // exp underflows to zero for huge stretches; stay strictly below the cap.
    if actual >= cap {
        return cap - cap.abs() * f64::EPSILON;
    }
    actual
}
