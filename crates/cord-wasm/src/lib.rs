//! WASM bridge for the pull cord. Exposes the Rust widget engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the SVG
//! elements, `requestAnimationFrame`, and `setTimeout`; every entry point
//! returns a JSON array of effects for the page to apply:
//!
//! ```json
//! [{"type":"redraw","path":"M 50 0 C …","handle":{…},…},
//!  {"type":"requestFrame"},
//!  {"type":"scheduleTimeout","timer":0,"delayMs":500}]
//! ```

use cord_core::{CordConfig, CordEffect, InputEvent, PointerKind, PullCord, TimerId, Viewport};
use cord_render::hit::hit_test_handle;
use cord_render::paint::{SvgCord, svg_path_data};
use wasm_bindgen::prelude::*;

/// The main WASM-facing widget controller.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct PullCordWidget {
    cord: PullCord,
}

#[wasm_bindgen]
impl PullCordWidget {
    /// Create a widget with default constants for a viewport of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<PullCordWidget, JsValue> {
        Self::with_config("{}", width, height)
    }

    /// Create a widget from a (possibly partial) JSON config object.
    pub fn with_config(config_json: &str, width: f64, height: f64) -> Result<PullCordWidget, JsValue> {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let config = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        let cord = PullCord::new(config, Viewport { width, height }).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { cord })
    }

    /// Start in dark mode (call before `mount`).
    pub fn set_initial_dark(&mut self, dark: bool) {
        self.cord.set_dark_mode(dark);
    }

    /// Initial draw, cursor, and theme.
    pub fn mount(&self) -> String {
        effects_json(&self.cord.mount())
    }

    /// Resize the viewport used to size the reveal circle.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.cord.set_viewport(Viewport { width, height });
    }

    pub fn is_dark(&self) -> bool {
        self.cord.is_dark()
    }

    /// Pointer pressed. Only presses on the grab target start a drag.
    ///
    /// `pointer_type` is the DOM `PointerEvent.pointerType`.
    pub fn pointer_down(&mut self, x: f64, y: f64, pointer_type: &str) -> String {
        if !hit_test_handle(&self.cord.geometry(), x, y) {
            log::trace!("press at ({x:.1}, {y:.1}) missed the grab target");
            return "[]".to_string();
        }
        let event = InputEvent::PointerDown {
            x,
            y,
            kind: PointerKind::from_pointer_type(pointer_type),
        };
        effects_json(&self.cord.handle_input(&event))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, pointer_type: &str) -> String {
        let event = InputEvent::PointerMove {
            x,
            y,
            kind: PointerKind::from_pointer_type(pointer_type),
        };
        effects_json(&self.cord.handle_input(&event))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, pointer_type: &str) -> String {
        let event = InputEvent::PointerUp {
            x,
            y,
            kind: PointerKind::from_pointer_type(pointer_type),
        };
        effects_json(&self.cord.handle_input(&event))
    }

    /// A click not preceded by a press on the grab target (e.g. keyboard).
    pub fn click(&mut self, x: f64, y: f64) -> String {
        effects_json(&self.cord.handle_input(&InputEvent::Click { x, y }))
    }

    /// `requestAnimationFrame` callback.
    pub fn on_frame(&mut self, now_ms: f64) -> String {
        effects_json(&self.cord.on_frame(now_ms))
    }

    /// `setTimeout` callback for a `scheduleTimeout` effect.
    pub fn on_timer(&mut self, timer: u32) -> String {
        effects_json(&self.cord.on_timer(TimerId(u64::from(timer))))
    }

    /// Current SVG attributes as JSON.
    pub fn svg(&self) -> String {
        svg_json(&SvgCord::new(self.cord.config(), &self.cord.geometry())).to_string()
    }
}

/// Parse a JSON config and validate it.
pub fn parse_config(json: &str) -> Result<CordConfig, String> {
    let config: CordConfig = serde_json::from_str(json).map_err(|e| format!("invalid config: {e}"))?;
    config.validate()?;
    Ok(config)
}

fn svg_json(svg: &SvgCord) -> serde_json::Value {
    serde_json::json!({
        "path": svg.path,
        "strokeWidth": svg.stroke_width,
        "handle": { "cx": svg.handle_cx, "cy": svg.handle_cy, "r": svg.handle_r },
        "hit": { "cx": svg.hit_cx, "cy": svg.hit_cy, "r": svg.hit_r },
    })
}

/// Serialize effects, adding the ready-made SVG path to every redraw.
pub fn effects_json(effects: &[CordEffect]) -> String {
    let values: Vec<serde_json::Value> = effects
        .iter()
        .map(|effect| {
            let mut value = serde_json::to_value(effect).unwrap_or(serde_json::Value::Null);
            if let CordEffect::Redraw(geometry) = effect
                && let Some(obj) = value.as_object_mut()
            {
                obj.insert("path".into(), serde_json::Value::String(svg_path_data(geometry)));
            }
            value
        })
        .collect();
    serde_json::to_string(&values).unwrap_or_else(|_| "[]".to_string())
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("pull cord WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
