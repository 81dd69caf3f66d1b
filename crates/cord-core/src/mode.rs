//! Light/dark mode toggle and the circular reveal transition.
//!
//! A toggle flips the mode immediately, asks the host to grow a reveal
//! circle from above the anchor, and schedules a single-shot timer. When
//! that timer fires the mode is committed to the host theme and all
//! transition styling is cleared.
//!
//! Toggles requested while a transition is pending are rejected. The
//! pending cleanup still runs exactly once.

use crate::config::{CordConfig, CubicBezierEasing, Viewport};
use crate::model::Color;
use kurbo::Point;
use serde::Serialize;

/// Identifies a scheduled single-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerId(pub u64);

/// The boolean mode plus the transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ModeState {
    /// The mode the widget is in (flips as soon as a toggle starts).
    pub dark: bool,
    /// The mode last committed to the host theme.
    pub committed_dark: bool,
    /// Cleanup timer of the in-flight transition, if any.
    pub pending: Option<TimerId>,
}

impl ModeState {
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }
}

/// Colours involved in one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub background: Color,
    pub old_cord: Color,
    pub new_cord: Color,
}

impl Palette {
    /// Colours for a transition *into* `dark`.
    pub fn for_mode(config: &CordConfig, dark: bool) -> Self {
        let (bg, fg) = if dark {
            (config.dark_color, config.light_color)
        } else {
            (config.light_color, config.dark_color)
        };
        Self {
            background: bg,
            // The old cord colour is the old foreground, i.e. the new background.
            old_cord: bg,
            new_cord: fg,
        }
    }
}

/// Request to the visual-transition collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealRequest {
    /// Circle centre in widget coordinates (above the anchor).
    pub center: Point,
    pub start_radius: f64,
    pub end_radius: f64,
    pub duration_ms: f64,
    pub easing: CubicBezierEasing,
    pub dark: bool,
    pub palette: Palette,
}

/// A started transition: the reveal to show and the timer to schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub reveal: RevealRequest,
    pub timer: TimerId,
    pub delay_ms: f64,
}

/// Owns the mode and serializes reveal transitions.
#[derive(Debug, Clone, Default)]
pub struct ModeToggleCoordinator {
    state: ModeState,
    next_timer: u64,
}

impl ModeToggleCoordinator {
    pub fn new(dark: bool) -> Self {
        Self {
            state: ModeState {
                dark,
                committed_dark: dark,
                pending: None,
            },
            next_timer: 0,
        }
    }

    /// Force the mode, dropping any pending transition. Timer ids keep
    /// counting so a cleanup scheduled before the reset stays stale.
    pub fn reset(&mut self, dark: bool) {
        if let Some(timer) = self.state.pending {
            log::debug!("mode reset abandons transition {timer:?}");
        }
        self.state = ModeState {
            dark,
            committed_dark: dark,
            pending: None,
        };
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn is_dark(&self) -> bool {
        self.state.dark
    }

    /// Flip the mode and start a reveal, unless one is already running.
    pub fn toggle(&mut self, config: &CordConfig, viewport: Viewport) -> Option<Transition> {
        if let Some(timer) = self.state.pending {
            log::warn!("toggle ignored: transition {timer:?} still pending");
            return None;
        }

        self.state.dark = !self.state.dark;
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        self.state.pending = Some(timer);

        let dark = self.state.dark;
        log::debug!("mode toggled to {}", if dark { "dark" } else { "light" });

        let reveal = RevealRequest {
            center: Point::new(config.anchor.x, config.anchor.y - config.reveal_start_offset),
            start_radius: config.reveal_start_offset,
            end_radius: viewport.reveal_radius(),
            duration_ms: config.reveal_duration_ms,
            easing: config.reveal_easing,
            dark,
            palette: Palette::for_mode(config, dark),
        };
        Some(Transition {
            reveal,
            timer,
            delay_ms: config.reveal_duration_ms,
        })
    }

    /// Handle a fired timer. Returns the mode to commit if `timer` is the
    /// pending transition's cleanup; stale or unknown timers are ignored.
    pub fn complete(&mut self, timer: TimerId) -> Option<bool> {
        if self.state.pending != Some(timer) {
            log::debug!("ignoring stale timer {timer:?}");
            return None;
        }
        self.state.pending = None;
        self.state.committed_dark = self.state.dark;
        Some(self.state.dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_does_not_reuse_timer_ids() {
        let config = CordConfig::default();
        let mut mode = ModeToggleCoordinator::new(false);
        let first = mode.toggle(&config, Viewport::default()).expect("toggle accepted");
        mode.reset(false);
        assert!(!mode.state().is_transitioning());

        let second = mode.toggle(&config, Viewport::default()).expect("toggle accepted");
        assert_ne!(first.timer, second.timer);
        assert_eq!(mode.complete(first.timer), None);
        assert!(mode.state().is_transitioning());
        assert_eq!(mode.complete(second.timer), Some(true));
    }

    #[test]
    fn toggle_flips_and_schedules_cleanup() {
        let config = CordConfig::default();
        let mut mode = ModeToggleCoordinator::new(false);
        let t = mode.toggle(&config, Viewport::default()).expect("toggle accepted");
        assert!(mode.is_dark());
        assert!(!mode.state().committed_dark);
        assert!(mode.state().is_transitioning());
        assert_eq!(t.delay_ms, 500.0);
        assert_eq!(t.reveal.center, Point::new(50.0, -50.0));
        assert_eq!(t.reveal.start_radius, 50.0);
        assert_eq!(t.reveal.end_radius, 1200.0);
        assert_eq!(t.reveal.palette.background, config.dark_color);
        assert_eq!(t.reveal.palette.new_cord, config.light_color);

        assert_eq!(mode.complete(t.timer), Some(true));
        assert!(mode.state().committed_dark);
        assert!(!mode.state().is_transitioning());
    }

    #[test]
    fn retrigger_during_transition_is_rejected() {
        let config = CordConfig::default();
        let mut mode = ModeToggleCoordinator::new(false);
        let t = mode.toggle(&config, Viewport::default()).unwrap();
        assert!(mode.toggle(&config, Viewport::default()).is_none());
        assert!(mode.is_dark());
        assert_eq!(mode.complete(t.timer), Some(true));
        // Cleanup runs exactly once.
        assert_eq!(mode.complete(t.timer), None);
    }

    #[test]
    fn toggling_twice_restores_mode() {
        let config = CordConfig::default();
        let mut mode = ModeToggleCoordinator::new(false);
        let first = mode.toggle(&config, Viewport::default()).unwrap();
        mode.complete(first.timer);
        let second = mode.toggle(&config, Viewport::default()).unwrap();
        assert_ne!(first.timer, second.timer);
        mode.complete(second.timer);
        assert_eq!(
            mode.state(),
            ModeState {
                dark: false,
                committed_dark: false,
                pending: None,
            }
        );
    }
}
