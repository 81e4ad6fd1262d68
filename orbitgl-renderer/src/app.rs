use std::{cell::RefCell, rc::Rc};

use compact_str::CompactString;
use orbitgl_core::{
    Camera, OrbitControl, ProjectionType, Scene, SphereNormals, DEFAULT_ORBIT_STEP,
};
use web_sys::console;

use crate::{
    gl::{MeshBuffers, ModelDraw, Renderer, SceneShader},
    input::KeyboardHandler,
    Error,
};

/// The orbit demo: a wireframe ground plane and three shaded spheres viewed
/// by a camera that orbits the origin.
///
/// Rendering is driven by events: [`OrbitApp::start`] renders once and
/// re-renders after each key-down. There is no continuous frame loop.
///
/// # Examples
///
/// ```rust,no_run
/// use orbitgl_renderer::{OrbitApp, ProjectionType};
///
/// let app = OrbitApp::builder("#canvas")
///     .projection(ProjectionType::Frustum)
///     .build()?;
///
/// // registers the W/A/S/D handler and renders the first frame
/// let running = app.start()?;
/// # Ok::<(), orbitgl_renderer::Error>(())
/// ```
#[derive(Debug)]
pub struct OrbitApp {
    renderer: Renderer,
    shader: SceneShader,
    scene: Scene,
    /// GPU buffers, parallel to `scene.models`
    meshes: Vec<MeshBuffers>,
    orbit_step: f32,
}

impl OrbitApp {
    /// Creates a new app builder for the specified canvas source.
    ///
    /// # Parameters
    /// * `canvas` - Canvas identifier (CSS selector) or `HtmlCanvasElement`
    #[allow(private_bounds)]
    pub fn builder(canvas: impl Into<CanvasSource>) -> OrbitAppBuilder {
        OrbitAppBuilder::new(canvas.into())
    }

    /// Renders one frame.
    ///
    /// Clears the framebuffer, recomputes projection, camera orbit, view and
    /// every model-view matrix, then draws the models in insertion order.
    pub fn render(&mut self) {
        self.renderer.begin_frame();
        self.scene.update_frame();

        self.shader.begin(self.renderer.gl(), &self.scene.camera.projection_matrix);
        for (model, mesh) in self.scene.models.iter().zip(&self.meshes) {
            self.renderer.render(&ModelDraw {
                shader: &self.shader,
                mesh,
                fill_style: &model.fill_style,
                model_view: &model.model_view,
            });
        }
    }

    /// Applies an orbit command without rendering.
    pub fn orbit(&mut self, control: OrbitControl) {
        self.scene.orbit(control, self.orbit_step);
    }

    /// Handles a key-down by its DOM `keyCode`.
    ///
    /// W/A/S/D orbit the camera; every key, mapped or not, triggers a render.
    pub fn handle_key_code(&mut self, key_code: u32) {
        if let Some(control) = OrbitControl::from_key_code(key_code) {
            self.orbit(control);
        }
        self.render();
    }

    /// Switches the projection used from the next frame on.
    pub fn set_projection(&mut self, projection: ProjectionType) {
        self.scene.camera.projection = projection;
    }

    /// Resizes the canvas and updates the camera's aspect ratio.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.renderer.resize(width, height);
        self.scene.camera.aspect = width as f32 / height as f32;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Registers the keyboard handler and renders the first frame.
    ///
    /// The returned [`RunningApp`] owns the key listener; dropping it
    /// unregisters the listener.
    pub fn start(self) -> Result<RunningApp, Error> {
        let app = Rc::new(RefCell::new(self));
        let keyboard = KeyboardHandler::new(app.clone())?;

        app.borrow_mut().render();

        Ok(RunningApp { app, keyboard })
    }
}

/// An [`OrbitApp`] with its keyboard handler attached.
#[derive(Debug)]
pub struct RunningApp {
    app: Rc<RefCell<OrbitApp>>,
    keyboard: KeyboardHandler,
}

impl RunningApp {
    /// Returns the shared app, as also seen by the key listener.
    pub fn app(&self) -> Rc<RefCell<OrbitApp>> {
        self.app.clone()
    }

    pub fn render(&self) {
        self.app.borrow_mut().render();
    }
}

/// Canvas source for app initialization.
///
/// Supports both CSS selector strings and direct `HtmlCanvasElement` references.
enum CanvasSource {
    /// CSS selector string for canvas lookup (e.g., "#canvas", "canvas").
    Id(CompactString),
    /// Direct reference to an existing canvas element.
    Element(web_sys::HtmlCanvasElement),
}

/// Builder for configuring and creating an [`OrbitApp`].
///
/// Defaults: perspective projection, an orbit step of π/60 per key press, a
/// light gray (`0xF2F2F2`) background and placeholder sphere normals.
pub struct OrbitAppBuilder {
    canvas: CanvasSource,
    config: AppConfig,
}

/// Settings collected by [`OrbitAppBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AppConfig {
    pub projection: ProjectionType,
    pub orbit_step: f32,
    pub clear_color: u32,
    pub sphere_normals: SphereNormals,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionType::default(),
            orbit_step: DEFAULT_ORBIT_STEP,
            clear_color: 0xF2F2F2,
            sphere_normals: SphereNormals::default(),
        }
    }
}

impl OrbitAppBuilder {
    fn new(canvas: CanvasSource) -> Self {
        OrbitAppBuilder { canvas, config: AppConfig::default() }
    }

    /// Sets the initial projection type.
    pub fn projection(mut self, projection: ProjectionType) -> Self {
        self.config.projection = projection;
        self
    }

    /// Sets the camera angle change per key press, in radians.
    pub fn orbit_step(mut self, step: f32) -> Self {
        self.config.orbit_step = step;
        self
    }

    /// Sets the framebuffer clear color as `0xRRGGBB`.
    pub fn clear_color(mut self, color: u32) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Chooses how sphere normals are generated.
    pub fn sphere_normals(mut self, normals: SphereNormals) -> Self {
        self.config.sphere_normals = normals;
        self
    }

    /// Builds the app: WebGL context, shader program, geometry and GPU buffers.
    pub fn build(self) -> Result<OrbitApp, Error> {
        let config = self.config;
        let renderer = match self.canvas {
            CanvasSource::Id(id) => Renderer::create(&id)?,
            CanvasSource::Element(element) => Renderer::create_with_canvas(element)?,
        };
        let renderer = renderer.clear_color(config.clear_color);

        let gl = renderer.gl();
        let shader = SceneShader::new(gl)?;

        let (width, height) = renderer.canvas_size();
        let camera = Camera {
            projection: config.projection,
            ..Camera::new(width as u32, height as u32)
        };
        let scene = Scene::demo(camera, config.sphere_normals)?;

        let meshes = scene
            .models
            .iter()
            .map(|model| MeshBuffers::upload(gl, &model.geometry))
            .collect::<Result<Vec<_>, _>>()?;

        let vertex_count: usize = scene.models.iter().map(|m| m.geometry.vertex_count()).sum();
        console::log_1(
            &format!(
                "orbitgl initialized: {} models, {vertex_count} vertices, {} projection",
                scene.models.len(),
                config.projection,
            )
            .into(),
        );

        Ok(OrbitApp {
            renderer,
            shader,
            scene,
            meshes,
            orbit_step: config.orbit_step,
        })
    }
}

impl From<&'static str> for CanvasSource {
    fn from(id: &'static str) -> Self {
        CanvasSource::Id(id.into())
    }
}

impl From<CompactString> for CanvasSource {
    fn from(id: CompactString) -> Self {
        CanvasSource::Id(id)
    }
}

impl From<web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(element: web_sys::HtmlCanvasElement) -> Self {
        CanvasSource::Element(element)
    }
}

impl<'a> From<&'a web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(value: &'a web_sys::HtmlCanvasElement) -> Self {
        value.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = OrbitApp::builder("#canvas");
        assert_eq!(builder.config, AppConfig::default());
        assert_eq!(builder.config.projection, ProjectionType::Perspective);
        assert_eq!(builder.config.orbit_step, std::f32::consts::PI / 60.0);
        assert_eq!(builder.config.clear_color, 0xF2F2F2);
        assert!(matches!(builder.canvas, CanvasSource::Id(ref id) if id == "#canvas"));
    }

    #[test]
    fn test_builder_overrides() {
        let builder = OrbitApp::builder("canvas")
            .projection(ProjectionType::Ortho)
            .orbit_step(0.1)
            .clear_color(0x000000)
            .sphere_normals(SphereNormals::Outward);

        assert_eq!(
            builder.config,
            AppConfig {
                projection: ProjectionType::Ortho,
                orbit_step: 0.1,
                clear_color: 0,
                sphere_normals: SphereNormals::Outward,
            }
        );
    }
}
