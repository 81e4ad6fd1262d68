use std::str::FromStr;

use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::{OrbitApp, OrbitControl, ProjectionType, RunningApp, SphereNormals};

/// JavaScript wrapper for the orbit demo
#[wasm_bindgen]
#[derive(Debug)]
pub struct OrbitGl {
    running: RunningApp,
}

/// Options accepted by the `OrbitGl` constructor; every field is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AppOptions {
    projection: Option<String>,
    orbit_step: Option<f32>,
    clear_color: Option<u32>,
    outward_normals: bool,
}

impl AppOptions {
    fn from_js(options: JsValue) -> Result<Self, JsValue> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }

        from_value(options).map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))
    }
}

#[wasm_bindgen]
impl OrbitGl {
    /// Create the demo on the canvas matching `canvas_id` and render the first frame
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, options: JsValue) -> Result<OrbitGl, JsValue> {
        console_error_panic_hook::set_once();

        let options = AppOptions::from_js(options)?;

        let mut builder = OrbitApp::builder(compact_str::CompactString::from(canvas_id));
        if let Some(projection) = options.projection.as_deref() {
            builder = builder.projection(parse_projection(projection)?);
        }
        if let Some(step) = options.orbit_step {
            builder = builder.orbit_step(step);
        }
        if let Some(color) = options.clear_color {
            builder = builder.clear_color(color);
        }
        if options.outward_normals {
            builder = builder.sphere_normals(SphereNormals::Outward);
        }

        let running = builder
            .build()
            .and_then(OrbitApp::start)
            .map_err(|e| JsValue::from_str(&format!("Failed to create renderer: {e}")))?;

        console::log_1(&"OrbitGl initialized successfully".into());

        Ok(OrbitGl { running })
    }

    /// Render the scene once
    #[wasm_bindgen]
    pub fn render(&self) {
        self.running.render();
    }

    /// Switch projection: "ortho", "frustum" or "perspective"; re-renders
    #[wasm_bindgen(js_name = "setProjection")]
    pub fn set_projection(&self, projection: &str) -> Result<(), JsValue> {
        let projection = parse_projection(projection)?;

        let app = self.running.app();
        let mut app = app.borrow_mut();
        app.set_projection(projection);
        app.render();
        Ok(())
    }

    /// Orbit as if `key` ("W", "A", "S" or "D") was pressed; any other string only re-renders
    #[wasm_bindgen]
    pub fn orbit(&self, key: &str) {
        let app = self.running.app();
        let mut app = app.borrow_mut();

        if let Some(control) = OrbitControl::from_key(key) {
            app.orbit(control);
        }
        app.render();
    }

    /// Current camera position as `[x, y, z]`
    #[wasm_bindgen(getter)]
    pub fn eye(&self) -> Vec<f32> {
        self.running.app().borrow().camera().eye.to_array().to_vec()
    }
}

fn parse_projection(projection: &str) -> Result<ProjectionType, JsValue> {
    ProjectionType::from_str(projection).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"orbitgl WASM module loaded".into());
}
