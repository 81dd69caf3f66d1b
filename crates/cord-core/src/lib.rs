pub mod click;
pub mod config;
pub mod curve;
pub mod effects;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod mode;
pub mod model;
pub mod physics;
pub mod widget;

pub use config::{CordConfig, Viewport};
pub use curve::{CordGeometry, cord_geometry};
pub use effects::{CordEffect, CordHost, CursorHint, Effects, apply_effects};
pub use input::{InputEvent, PointerKind};
pub use mode::{ModeState, RevealRequest, TimerId};
pub use model::*;
pub use widget::{PullCord, WidgetPhase};

// Re-export kurbo geometry so hosts don't need a direct dependency
pub use kurbo::{Circle, CubicBez, Point, Vec2};
