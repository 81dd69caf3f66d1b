//! Cord geometry → drawing primitives.
//!
//! The widget core only computes geometry. This module turns it into what
//! a drawing collaborator consumes: SVG attribute values for DOM hosts, or a
//! `kurbo::BezPath` for vector renderers.

use cord_core::{CordConfig, CordGeometry};
use kurbo::BezPath;

/// SVG attributes for one frame: the cord path plus both circles.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgCord {
    /// `d` attribute of the cord `<path>`.
    pub path: String,
    pub stroke_width: f64,
    pub handle_cx: f64,
    pub handle_cy: f64,
    pub handle_r: f64,
    pub hit_cx: f64,
    pub hit_cy: f64,
    pub hit_r: f64,
}

impl SvgCord {
    pub fn new(config: &CordConfig, geometry: &CordGeometry) -> Self {
        Self {
            path: svg_path_data(geometry),
            stroke_width: config.cord_width,
            handle_cx: geometry.handle.center.x,
            handle_cy: geometry.handle.center.y,
            handle_r: geometry.handle.radius,
            hit_cx: geometry.hit_area.center.x,
            hit_cy: geometry.hit_area.center.y,
            hit_r: geometry.hit_area.radius,
        }
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// The cord as SVG path data: `M x y C x1 y1, x2 y2, x y`.
pub fn svg_path_data(geometry: &CordGeometry) -> String {
    let c = geometry.curve;
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        num(c.p0.x),
        num(c.p0.y),
        num(c.p1.x),
        num(c.p1.y),
        num(c.p2.x),
        num(c.p2.y),
        num(c.p3.x),
        num(c.p3.y),
    )
}

/// The cord as a single-segment `BezPath`.
pub fn cord_bez_path(geometry: &CordGeometry) -> BezPath {
    let c = geometry.curve;
    let mut path = BezPath::new();
    path.move_to(c.p0);
    path.curve_to(c.p1, c.p2, c.p3);
    path
}
