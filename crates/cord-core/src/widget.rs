//! The pull-cord widget: single owner of all simulation state.
//!
//! `PullCord` holds the handle, the control state machine, and the mode
//! coordinator, and lends the handle to exactly one controller at a time:
//!
//! | From             | Event                         | To             |
//! |------------------|-------------------------------|----------------|
//! | any but Dragging | pointer-down                  | Dragging       |
//! | Dragging         | pointer-up after movement     | Settling       |
//! | Dragging         | pointer-up without movement   | ClickAnimating |
//! | Idle             | click                         | ClickAnimating |
//! | Settling         | handle settled                | Idle           |
//! | ClickAnimating   | return phase complete         | Idle           |
//!
//! A press that lands during the click animation pauses it. If the press
//! ends as a tap the same animation resumes on its original timeline; a
//! pointer move turns it into a drag and the animation is dropped.
//!
//! A reveal transition (`Toggling`) runs alongside these states and is owned
//! by the [`ModeToggleCoordinator`]. Frame and timer callbacks are requested
//! through [`CordEffect`]s and delivered back via [`PullCord::on_frame`] and
//! [`PullCord::on_timer`].

use crate::click::ClickPullAnimator;
use crate::config::{CordConfig, Viewport};
use crate::curve::{CordGeometry, cord_geometry};
use crate::effects::{CordEffect, CursorHint, Effects};
use crate::gesture::{GestureSession, Release};
use crate::input::{InputEvent, PointerKind};
use crate::mode::{ModeState, ModeToggleCoordinator, TimerId};
use crate::model::{HandleState, StepOutcome};
use crate::physics::PhysicsIntegrator;
use kurbo::Point;
use smallvec::smallvec;

/// Which controller owns the handle.
#[derive(Debug, Clone)]
enum ControlState {
    Idle,
    Dragging {
        session: GestureSession,
        /// Click animation paused by this press.
        paused_click: Option<ClickPullAnimator>,
    },
    Settling(PhysicsIntegrator),
    ClickAnimating(ClickPullAnimator),
}

/// Coarse widget phase, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    Idle,
    Dragging,
    SettlingPhysics,
    ClickAnimating,
    /// No loop owns the handle but a reveal transition is still pending.
    Toggling,
}

pub struct PullCord {
    config: CordConfig,
    viewport: Viewport,
    handle: HandleState,
    control: ControlState,
    mode: ModeToggleCoordinator,
    /// At most one frame request is outstanding at any time.
    frame_requested: bool,
}

impl PullCord {
    /// Create a widget hanging at rest in light mode.
    ///
    /// # Errors
    /// Returns the validation error if `config` is inconsistent.
    pub fn new(config: CordConfig, viewport: Viewport) -> Result<Self, String> {
        config.validate()?;
        let handle = HandleState::at(config.rest_position());
        Ok(Self {
            config,
            viewport,
            handle,
            control: ControlState::Idle,
            mode: ModeToggleCoordinator::new(false),
            frame_requested: false,
        })
    }

    /// Start in the given mode instead of light.
    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.set_dark_mode(dark);
        self
    }

    /// Replace the mode outright, dropping any pending transition.
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.mode.reset(dark);
    }

    pub fn config(&self) -> &CordConfig {
        &self.config
    }

    pub fn handle(&self) -> &HandleState {
        &self.handle
    }

    pub fn mode(&self) -> ModeState {
        self.mode.state()
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn phase(&self) -> WidgetPhase {
        match self.control {
            ControlState::Dragging { .. } => WidgetPhase::Dragging,
            ControlState::Settling(_) => WidgetPhase::SettlingPhysics,
            ControlState::ClickAnimating(_) => WidgetPhase::ClickAnimating,
            ControlState::Idle if self.mode.state().is_transitioning() => WidgetPhase::Toggling,
            ControlState::Idle => WidgetPhase::Idle,
        }
    }

    pub fn geometry(&self) -> CordGeometry {
        cord_geometry(&self.config, &self.handle)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Effects to run once when the widget is first shown.
    pub fn mount(&self) -> Effects {
        smallvec![
            CordEffect::Redraw(self.geometry()),
            CordEffect::SetCursor {
                cursor: CursorHint::Grab
            },
            CordEffect::CommitMode {
                dark: self.mode.state().committed_dark
            },
        ]
    }

    /// Drop whatever loop is running and hang the handle at rest.
    pub fn reset(&mut self) -> Effects {
        self.control = ControlState::Idle;
        self.handle.reset_to(self.config.rest_position());
        smallvec![CordEffect::Redraw(self.geometry())]
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Feed one pointer event to the widget.
    pub fn handle_input(&mut self, event: &InputEvent) -> Effects {
        if !event.is_finite() {
            log::warn!("dropping non-finite input {event:?}");
            return Effects::new();
        }
        let pointer = event.position();
        match event {
            InputEvent::PointerDown { kind, .. } => self.begin_drag(pointer, *kind),
            InputEvent::PointerMove { .. } => self.drag_to(pointer),
            InputEvent::PointerUp { .. } => self.end_drag(),
            InputEvent::Click { .. } => {
                let mut effects = Effects::new();
                if matches!(self.control, ControlState::Idle) {
                    self.start_click(&mut effects);
                } else {
                    log::debug!("click ignored while {:?}", self.phase());
                }
                effects
            }
        }
    }

    fn begin_drag(&mut self, pointer: Point, kind: PointerKind) -> Effects {
        let paused_click = match &self.control {
            ControlState::Dragging { .. } => {
                log::debug!("second {kind:?} pointer ignored during drag");
                return Effects::new();
            }
            ControlState::ClickAnimating(anim) => {
                log::debug!("{kind:?} press pauses click animation");
                Some(anim.clone())
            }
            ControlState::Settling(_) => {
                log::debug!("{kind:?} press cancels settling");
                None
            }
            ControlState::Idle => None,
        };
        self.control = ControlState::Dragging {
            session: GestureSession::start(pointer, &self.handle),
            paused_click,
        };
        smallvec![CordEffect::SetCursor {
            cursor: CursorHint::Grabbing
        }]
    }

    fn drag_to(&mut self, pointer: Point) -> Effects {
        let ControlState::Dragging { session, .. } = &mut self.control else {
            return Effects::new();
        };
        let update = session.update(&self.config, &mut self.handle, pointer);

        let mut effects = Effects::new();
        if !self.handle.is_finite() {
            log::error!("handle became non-finite during drag; resetting to rest");
            self.handle.reset_to(self.config.rest_position());
        }
        effects.push(CordEffect::Redraw(self.geometry()));
        if update.toggle {
            self.toggle_mode(&mut effects);
        }
        effects
    }

    fn end_drag(&mut self) -> Effects {
        let (session, paused_click) = match std::mem::replace(&mut self.control, ControlState::Idle) {
            ControlState::Dragging {
                session,
                paused_click,
            } => (session, paused_click),
            other => {
                self.control = other;
                return Effects::new();
            }
        };

        let mut effects: Effects = smallvec![CordEffect::SetCursor {
            cursor: CursorHint::Grab
        }];
        match session.end(&self.config, &self.handle) {
            Release::Click => match paused_click {
                Some(anim) => {
                    log::debug!("tap during click animation; resuming");
                    self.control = ControlState::ClickAnimating(anim);
                    self.request_frame(&mut effects);
                }
                None => self.start_click(&mut effects),
            },
            Release::Fling { velocity } => {
                log::debug!("released with velocity ({:.2}, {:.2})", velocity.x, velocity.y);
                self.handle.velocity = velocity;
                self.control = ControlState::Settling(PhysicsIntegrator::new());
                self.request_frame(&mut effects);
            }
        }
        effects
    }

    fn start_click(&mut self, effects: &mut Effects) {
        log::debug!("click: starting pull animation");
        self.control = ControlState::ClickAnimating(ClickPullAnimator::new(&self.handle));
        self.request_frame(effects);
    }

    // ─── Host callbacks ──────────────────────────────────────────────────

    /// Advance the active loop to the frame timestamp `now_ms`.
    pub fn on_frame(&mut self, now_ms: f64) -> Effects {
        self.frame_requested = false;
        let mut effects = Effects::new();

        let (outcome, toggle) = match &mut self.control {
            ControlState::Settling(physics) => (physics.step(&self.config, &mut self.handle), false),
            ControlState::ClickAnimating(anim) => {
                let step = anim.step(&self.config, &mut self.handle, now_ms);
                (step.outcome, step.toggle)
            }
            ControlState::Idle | ControlState::Dragging { .. } => {
                log::trace!("frame at {now_ms:.1} with no running loop");
                return effects;
            }
        };

        if !self.handle.is_finite() {
            log::error!("handle became non-finite in {:?}; resetting to rest", self.phase());
            return self.reset();
        }

        effects.push(CordEffect::Redraw(self.geometry()));
        if toggle {
            self.toggle_mode(&mut effects);
        }
        match outcome {
            StepOutcome::Continue => self.request_frame(&mut effects),
            StepOutcome::Done => {
                log::debug!("{:?} finished", self.phase());
                self.control = ControlState::Idle;
            }
        }
        effects
    }

    /// Handle a single-shot timer scheduled through `ScheduleTimeout`.
    pub fn on_timer(&mut self, timer: TimerId) -> Effects {
        match self.mode.complete(timer) {
            Some(dark) => smallvec![CordEffect::CommitMode { dark }],
            None => Effects::new(),
        }
    }

    fn toggle_mode(&mut self, effects: &mut Effects) {
        if let Some(transition) = self.mode.toggle(&self.config, self.viewport) {
            effects.push(CordEffect::BeginReveal(transition.reveal));
            effects.push(CordEffect::ScheduleTimeout {
                timer: transition.timer,
                delay_ms: transition.delay_ms,
            });
        }
    }

    fn request_frame(&mut self, effects: &mut Effects) {
        if !self.frame_requested {
            self.frame_requested = true;
            effects.push(CordEffect::RequestFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn widget() -> PullCord {
        PullCord::new(CordConfig::default(), Viewport::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CordConfig {
            damping: 1.0,
            ..CordConfig::default()
        };
        assert!(PullCord::new(config, Viewport::default()).is_err());
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut w = widget();
        assert!(w.handle_input(&InputEvent::pointer_move(50.0, 90.0)).is_empty());
        assert_eq!(w.handle().position, w.config().rest_position());
    }

    #[test]
    fn non_finite_input_is_dropped() {
        let mut w = widget();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        let effects = w.handle_input(&InputEvent::pointer_move(f64::NAN, 90.0));
        assert!(effects.is_empty());
        assert!(w.handle().is_finite());
    }

    #[test]
    fn frame_requests_are_deduplicated() {
        let mut w = widget();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        w.handle_input(&InputEvent::pointer_move(50.0, 90.0));
        let up = w.handle_input(&InputEvent::pointer_up(50.0, 90.0));
        assert!(up.contains(&CordEffect::RequestFrame));

        // Grab again before the frame arrives, then release again.
        w.handle_input(&InputEvent::pointer_down(50.0, 85.0));
        w.handle_input(&InputEvent::pointer_move(50.0, 95.0));
        let up = w.handle_input(&InputEvent::pointer_up(50.0, 95.0));
        assert!(!up.contains(&CordEffect::RequestFrame));
        assert_eq!(w.phase(), WidgetPhase::SettlingPhysics);
    }

    #[test]
    fn stale_frame_during_drag_is_a_no_op() {
        let mut w = widget();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        w.handle_input(&InputEvent::pointer_up(50.0, 50.0));
        assert_eq!(w.phase(), WidgetPhase::ClickAnimating);

        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        assert_eq!(w.phase(), WidgetPhase::Dragging);
        let before = *w.handle();
        assert!(w.on_frame(16.0).is_empty());
        assert_eq!(*w.handle(), before);
    }

    #[test]
    fn non_finite_physics_resets_to_rest() {
        // Finite but absurd: the release velocity overflows to infinity.
        let config = CordConfig {
            snap_back_factor: 1e308,
            ..CordConfig::default()
        };
        let mut w = PullCord::new(config, Viewport::default()).unwrap();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        w.handle_input(&InputEvent::pointer_move(50.0, 70.0));
        w.handle_input(&InputEvent::pointer_up(50.0, 70.0));
        assert_eq!(w.phase(), WidgetPhase::SettlingPhysics);
        assert!(w.handle().velocity.y.is_infinite());

        let effects = w.on_frame(16.0);
        assert!(!effects.contains(&CordEffect::RequestFrame));
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], CordEffect::Redraw(_)));
        assert_eq!(w.handle().position, w.config().rest_position());
        assert_eq!(w.handle().velocity, Vec2::ZERO);
        assert_eq!(w.phase(), WidgetPhase::Idle);
        assert!(w.on_frame(32.0).is_empty());
    }

    #[test]
    fn set_dark_mode_keeps_stale_timers_stale() {
        let mut w = widget();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        let first = w.handle_input(&InputEvent::pointer_move(50.0, 130.0));
        w.handle_input(&InputEvent::pointer_up(50.0, 130.0));
        w.set_dark_mode(false);
        assert!(!w.mode().is_transitioning());

        w.reset();
        w.handle_input(&InputEvent::pointer_down(50.0, 50.0));
        let second = w.handle_input(&InputEvent::pointer_move(50.0, 130.0));
        let timer = |effects: &Effects| {
            effects.iter().find_map(|e| match e {
                CordEffect::ScheduleTimeout { timer, .. } => Some(*timer),
                _ => None,
            })
        };
        let (old, new) = (timer(&first).unwrap(), timer(&second).unwrap());
        assert_ne!(old, new);

        assert!(w.on_timer(old).is_empty());
        assert!(w.mode().is_transitioning());
        assert_eq!(w.on_timer(new).as_slice(), &[CordEffect::CommitMode { dark: true }]);
        assert!(!w.mode().is_transitioning());
    }

    #[test]
    fn mount_reports_initial_mode() {
        let w = widget().with_dark_mode(true);
        assert!(w.mount().contains(&CordEffect::CommitMode { dark: true }));
    }
}
