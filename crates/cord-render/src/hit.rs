//! Hit testing: pointer → grab target lookup.
//!
//! A drag may only start on the handle's invisible grab target, which is
//! larger than the visible handle for easier grabbing.

use cord_core::{CordGeometry, Point};

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CordHit {
    /// The grab target around the handle.
    Handle,
    /// Anywhere else (background).
    Miss,
}

/// Classify the pointer position `(px, py)` against the cord geometry.
pub fn hit_test(geometry: &CordGeometry, px: f64, py: f64) -> CordHit {
    let target = geometry.hit_area;
    let d = (Point::new(px, py) - target.center).hypot();
    if d <= target.radius {
        CordHit::Handle
    } else {
        CordHit::Miss
    }
}

/// `true` if the pointer may start a drag.
pub fn hit_test_handle(geometry: &CordGeometry, px: f64, py: f64) -> bool {
    let hit = hit_test(geometry, px, py);
    log::trace!("hit test ({px:.1}, {py:.1}) -> {hit:?}");
    hit == CordHit::Handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use cord_core::{CordConfig, HandleState, cord_geometry};

    #[test]
    fn grab_target_is_larger_than_handle() {
        let config = CordConfig::default();
        let geometry = cord_geometry(&config, &HandleState::at(config.rest_position()));

        // Dead centre and just inside the 20-unit hit radius.
        assert_eq!(hit_test(&geometry, 50.0, 50.0), CordHit::Handle);
        assert_eq!(hit_test(&geometry, 50.0, 69.5), CordHit::Handle);
        assert!(hit_test_handle(&geometry, 62.0, 62.0));

        // Outside the hit radius.
        assert_eq!(hit_test(&geometry, 50.0, 71.0), CordHit::Miss);
        assert_eq!(hit_test(&geometry, 10.0, 10.0), CordHit::Miss);
    }

    #[test]
    fn hit_area_follows_the_handle() {
        let config = CordConfig::default();
        let geometry = cord_geometry(&config, &HandleState::at(Point::new(80.0, 70.0)));
        assert!(hit_test_handle(&geometry, 85.0, 75.0));
        assert!(!hit_test_handle(&geometry, 50.0, 50.0));
    }
}
