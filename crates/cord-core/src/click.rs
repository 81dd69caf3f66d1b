//! Click tween: a scripted pull-and-release without a real drag.
//!
//! Phase A eases the handle down to the pull distance (ease-in quad); the
//! toggle fires exactly at the phase boundary; phase B eases it back up to
//! rest length (ease-out quad). Timing comes from frame timestamps, so the
//! whole tween lasts exactly `pull_down + pull_up` milliseconds from the
//! first frame regardless of frame rate.

use crate::config::CordConfig;
use crate::model::{HandleState, StepOutcome};
use kurbo::Vec2;

pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Waiting for the first frame timestamp.
    Pending,
    PullDown { started_ms: f64 },
    Return { started_ms: f64 },
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickStep {
    pub outcome: StepOutcome,
    /// `true` on the frame that completed the pull-down phase.
    pub toggle: bool,
}

impl ClickStep {
    const CONTINUE: Self = Self {
        outcome: StepOutcome::Continue,
        toggle: false,
    };
}

/// Drives the handle through the click pull tween.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickPullAnimator {
    phase: Phase,
    /// Handle y when the animation started.
    start_y: f64,
}

impl ClickPullAnimator {
    pub fn new(handle: &HandleState) -> Self {
        Self {
            phase: Phase::Pending,
            start_y: handle.position.y,
        }
    }

    /// Advance the tween to the frame timestamp `now_ms`.
    pub fn step(&mut self, config: &CordConfig, handle: &mut HandleState, now_ms: f64) -> ClickStep {
        handle.position.x = config.anchor.x;
        handle.velocity = Vec2::ZERO;

        match self.phase {
            Phase::Pending => {
                self.phase = Phase::PullDown { started_ms: now_ms };
                self.pull_down(config, handle, now_ms, now_ms)
            }
            Phase::PullDown { started_ms } => self.pull_down(config, handle, started_ms, now_ms),
            Phase::Return { started_ms } => self.pull_up(config, handle, started_ms, now_ms),
        }
    }

    fn pull_down(
        &mut self,
        config: &CordConfig,
        handle: &mut HandleState,
        started_ms: f64,
        now_ms: f64,
    ) -> ClickStep {
        let pull_y = config.anchor.y + config.click_pull_distance;
        let progress = progress(now_ms - started_ms, config.click_pull_down_ms);
        handle.position.y = self.start_y + (pull_y - self.start_y) * ease_in_quad(progress);
        if progress < 1.0 {
            return ClickStep::CONTINUE;
        }
        // Phase B is timed from the exact boundary, not from this frame.
        self.phase = Phase::Return {
            started_ms: started_ms + config.click_pull_down_ms,
        };
        log::debug!("click pull reached {pull_y:.1}; toggling");
        ClickStep {
            outcome: StepOutcome::Continue,
            toggle: true,
        }
    }

    fn pull_up(
        &mut self,
        config: &CordConfig,
        handle: &mut HandleState,
        started_ms: f64,
        now_ms: f64,
    ) -> ClickStep {
        let pull_y = config.anchor.y + config.click_pull_distance;
        let rest_y = config.anchor.y + config.rest_length;
        let progress = progress(now_ms - started_ms, config.click_pull_up_ms);
        handle.position.y = pull_y + (rest_y - pull_y) * ease_out_quad(progress);
        if progress < 1.0 {
            return ClickStep::CONTINUE;
        }
        handle.reset_to(config.rest_position());
        ClickStep {
            outcome: StepOutcome::Done,
            toggle: false,
        }
    }
}

fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_quad(0.0), 0.0);
        assert_eq!(ease_in_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_in_quad(0.5) < 0.5 && ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn toggles_at_phase_boundary_and_finishes_at_total_duration() {
        let config = CordConfig::default();
        let mut handle = HandleState::at(config.rest_position());
        let mut anim = ClickPullAnimator::new(&handle);

        let t0 = 1000.0;
        let mut toggled_at = None;
        let mut done_at = None;
        let mut t = t0;
        while t <= t0 + 400.0 {
            let step = anim.step(&config, &mut handle, t);
            if step.toggle {
                assert!(toggled_at.is_none(), "toggled twice");
                toggled_at = Some(t - t0);
            }
            if step.outcome == StepOutcome::Done {
                done_at = Some(t - t0);
                break;
            }
            t += 5.0;
        }

        assert_eq!(toggled_at, Some(75.0));
        assert_eq!(done_at, Some(225.0));
        assert_eq!(handle.position, config.rest_position());
    }

    #[test]
    fn late_frame_keeps_return_timed_from_boundary() {
        let config = CordConfig::default();
        let mut handle = HandleState::at(config.rest_position());
        let mut anim = ClickPullAnimator::new(&handle);

        anim.step(&config, &mut handle, 0.0);
        let step = anim.step(&config, &mut handle, 90.0);
        assert!(step.toggle);
        assert_eq!(handle.position.y, 75.0);

        let step = anim.step(&config, &mut handle, 224.0);
        assert_eq!(step.outcome, StepOutcome::Continue);
        let step = anim.step(&config, &mut handle, 225.0);
        assert_eq!(step.outcome, StepOutcome::Done);
    }

    #[test]
    fn horizontal_position_snaps_to_anchor() {
        let config = CordConfig::default();
        let mut handle = HandleState::at(kurbo::Point::new(70.0, 45.0));
        let mut anim = ClickPullAnimator::new(&handle);
        anim.step(&config, &mut handle, 0.0);
        assert_eq!(handle.position.x, config.anchor.x);
        assert_eq!(handle.position.y, 45.0);
        anim.step(&config, &mut handle, 37.5);
        // progress 0.5 → eased 0.25 of the way from 45 to 75.
        assert!((handle.position.y - 52.5).abs() < 1e-9);
    }
}
