//! Free-fall motion of the released handle.
//!
//! One call to [`PhysicsIntegrator::step`] is one frame of explicit Euler:
//! gravity, isotropic damping, integration, then the taut-cord constraint.
//! Once free, the cord is an inelastic tether of rest length: it absorbs
//! outward radial motion but lets the handle swing and fall inside the
//! circle.

use crate::config::CordConfig;
use crate::geometry::radial;
use crate::model::{HandleState, StepOutcome};
use kurbo::Vec2;

/// Velocity seeded on release, pointing back toward the anchor in
/// proportion to how far the cord was stretched past rest length.
pub fn release_velocity(config: &CordConfig, handle: &HandleState) -> Vec2 {
    let (direction, distance) = radial(config.anchor, handle.position);
    if distance <= config.rest_length {
        return Vec2::ZERO;
    }
    let stretch = distance - config.rest_length;
    -direction * stretch * config.snap_back_factor
}

/// Drives the handle after release until it settles at rest.
#[derive(Debug, Clone, Default)]
pub struct PhysicsIntegrator {
    steps: u32,
}

impl PhysicsIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Advance the handle by one frame.
    ///
    /// Returns `Done` once the handle is at rest (snapped exactly to the rest
    /// point) or the step cap is reached.
    pub fn step(&mut self, config: &CordConfig, handle: &mut HandleState) -> StepOutcome {
        self.steps += 1;

        handle.velocity.y += config.gravity;
        handle.velocity *= config.damping;
        handle.position += handle.velocity;

        let (direction, distance) = radial(config.anchor, handle.position);
        if distance > config.rest_length {
            handle.position = config.anchor + direction * config.rest_length;
            let outward = handle.velocity.dot(direction);
            if outward > 0.0 {
                handle.velocity -= direction * outward;
            }
        }

        let rest = config.rest_position();
        if is_settled(config, handle) {
            log::trace!("physics settled after {} steps", self.steps);
            handle.reset_to(rest);
            return StepOutcome::Done;
        }
        if self.steps >= config.max_settle_steps {
            log::warn!(
                "physics did not settle within {} steps; snapping to rest",
                config.max_settle_steps
            );
            handle.reset_to(rest);
            return StepOutcome::Done;
        }

        log::trace!(
            "physics step {} pos=({:.2}, {:.2}) vel=({:.3}, {:.3})",
            self.steps,
            handle.position.x,
            handle.position.y,
            handle.velocity.x,
            handle.velocity.y
        );
        StepOutcome::Continue
    }
}

fn is_settled(config: &CordConfig, handle: &HandleState) -> bool {
    let rest = config.rest_position();
    handle.velocity.hypot() < config.settle_velocity_epsilon
        && (handle.position.x - rest.x).abs() < config.settle_position_epsilon
        && (handle.position.y - rest.y).abs() < config.settle_position_epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn run_to_rest(config: &CordConfig, handle: &mut HandleState) -> u32 {
        let mut physics = PhysicsIntegrator::new();
        while physics.step(config, handle) == StepOutcome::Continue {}
        physics.steps()
    }

    #[test]
    fn release_at_rest_length_seeds_no_velocity() {
        let config = CordConfig::default();
        let h = HandleState::at(config.rest_position());
        assert_eq!(release_velocity(&config, &h), Vec2::ZERO);
    }

    #[test]
    fn release_when_stretched_points_at_anchor() {
        let config = CordConfig::default();
        // 30 units past rest, straight down: v = -(0, 1) * 30 * 0.2.
        let h = HandleState::at(Point::new(50.0, 80.0));
        let v = release_velocity(&config, &h);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y + 6.0).abs() < 1e-12);
    }

    #[test]
    fn settles_immediately_from_rest() {
        let config = CordConfig::default();
        let mut h = HandleState::at(config.rest_position());
        let steps = run_to_rest(&config, &mut h);
        assert!(steps <= 5, "took {steps} steps");
        assert_eq!(h.position, config.rest_position());
        assert_eq!(h.velocity, Vec2::ZERO);
    }

    #[test]
    fn constraint_keeps_handle_inside_rest_circle() {
        let config = CordConfig::default();
        let mut h = HandleState {
            position: Point::new(90.0, 30.0),
            velocity: Vec2::new(8.0, 3.0),
        };
        let mut physics = PhysicsIntegrator::new();
        for _ in 0..200 {
            let outcome = physics.step(&config, &mut h);
            let d = (h.position - config.anchor).hypot();
            assert!(d <= config.rest_length + 1e-9, "distance {d}");
            if outcome == StepOutcome::Done {
                break;
            }
        }
    }

    #[test]
    fn constraint_removes_only_outward_velocity() {
        let config = CordConfig {
            gravity: 0.0,
            damping: 0.999,
            ..CordConfig::default()
        };
        // On the circle to the right of the anchor, moving outward and down.
        let mut h = HandleState {
            position: Point::new(100.0, 0.0),
            velocity: Vec2::new(2.0, 1.0),
        };
        PhysicsIntegrator::new().step(&config, &mut h);
        let (dir, _) = radial(config.anchor, h.position);
        assert!(h.velocity.dot(dir) <= 1e-9);
        assert!(h.velocity.y > 0.0, "tangential motion must survive");
    }

    #[test]
    fn swinging_release_settles_at_rest() {
        let config = CordConfig::default();
        let mut h = HandleState {
            position: Point::new(10.0, 30.0),
            velocity: Vec2::new(-4.0, -2.0),
        };
        let steps = run_to_rest(&config, &mut h);
        assert!(steps < config.max_settle_steps, "hit the step cap");
        assert_eq!(h.position, config.rest_position());
    }

    #[test]
    fn step_cap_bounds_the_loop() {
        let config = CordConfig {
            max_settle_steps: 3,
            ..CordConfig::default()
        };
        let mut h = HandleState {
            position: Point::new(10.0, 30.0),
            velocity: Vec2::new(-40.0, -20.0),
        };
        let steps = run_to_rest(&config, &mut h);
        assert_eq!(steps, 3);
        assert_eq!(h.position, config.rest_position());
    }
}
