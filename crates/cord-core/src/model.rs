//! Core data model: handle state, colours, and per-step outcomes.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

// ─── Handle ───────────────────────────────────────────────────────────────

/// Position and per-frame velocity of the free end of the cord.
///
/// Exactly one controller mutates this at a time; the widget hands it out
/// by `&mut` to whichever loop currently owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleState {
    pub position: Point,
    pub velocity: Vec2,
}

impl HandleState {
    /// A handle at rest at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Snap to `rest` with zero velocity.
    pub fn reset_to(&mut self, rest: Point) {
        self.position = rest;
        self.velocity = Vec2::ZERO;
    }
}

/// Result of advancing a frame-driven loop by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The loop wants another frame.
    Continue,
    /// The loop has finished and released the handle.
    Done,
}

// ─── Colour ───────────────────────────────────────────────────────────────

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb8(r * 17, g * 17, b * 17))
            }
            6 => {
                let pair = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);
                Some(Self::rgb8(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid colour {s:?}")))
    }
}
