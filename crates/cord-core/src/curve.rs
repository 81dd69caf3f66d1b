//! Cord curve: handle state → drawable geometry.
//!
//! The cord is a single cubic Bézier from the anchor to the handle. Two
//! control-point sets are blended by how slack the cord is:
//!
//! - **straight**: control points at 1/3 and 2/3 along the anchor→handle
//!   segment, used when the cord is taut or stretched.
//! - **draped**: the first control point hangs under the anchor, the second
//!   sits just below the handle, so a slack cord sags.
//!
//! The blend ramps over `slack_transition_zone` units below rest length, so
//! the curve is continuous at both ends of the ramp. Nothing here has side
//! effects; drawing is the host's job.

use crate::config::CordConfig;
use crate::model::HandleState;
use kurbo::{Circle, CubicBez, Point};
use serde::Serialize;

/// Everything a drawing collaborator needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CordGeometry {
    pub curve: CubicBez,
    /// The visible handle.
    pub handle: Circle,
    /// The larger, invisible grab target.
    pub hit_area: Circle,
    /// 0 = taut, 1 = fully draped.
    pub slack_ratio: f64,
}

/// Compute the cord geometry for a handle state.
pub fn cord_geometry(config: &CordConfig, handle: &HandleState) -> CordGeometry {
    let anchor = config.anchor;
    let end = handle.position;
    let delta = end - anchor;
    let distance = delta.hypot();

    let slack = config.rest_length - distance;
    let slack_ratio = (slack / config.slack_transition_zone).clamp(0.0, 1.0);
    let drape = slack.max(0.0) * config.drape_factor * slack_ratio;

    let straight1 = anchor + delta * (1.0 / 3.0);
    let straight2 = anchor + delta * (2.0 / 3.0);

    let draped1 = Point::new(
        anchor.x,
        anchor.y + config.rest_length * 0.5 + drape * 0.5,
    );
    let draped2 = Point::new(end.x, end.y + drape);

    let curve = CubicBez::new(
        anchor,
        straight1.lerp(draped1, slack_ratio),
        straight2.lerp(draped2, slack_ratio),
        end,
    );

    CordGeometry {
        curve,
        handle: Circle::new(end, config.handle_radius),
        hit_area: Circle::new(end, config.hit_radius),
        slack_ratio,
    }
}
