use web_sys::HtmlCanvasElement;

use crate::{
    error::Error,
    gl::{context::GlState, GL},
    js,
};

/// Rendering context that provides access to WebGL state.
pub(crate) struct RenderContext<'a> {
    pub gl: &'a web_sys::WebGl2RenderingContext,
    pub state: &'a mut GlState,
}

/// WebGL2 renderer owning the canvas and its rendering context.
///
/// Creation sets up the pipeline state that never changes afterwards: back-face
/// culling, depth testing, polygon offset and the viewport. Each frame is
/// cleared with [`Renderer::begin_frame`] and populated through
/// [`Renderer::render`].
#[derive(Debug)]
pub struct Renderer {
    gl: web_sys::WebGl2RenderingContext,
    canvas: web_sys::HtmlCanvasElement,
    state: GlState,
    clear_color: (f32, f32, f32),
}

impl Renderer {
    /// Creates a new renderer by querying for a canvas element.
    ///
    /// # Parameters
    /// * `canvas_id` - CSS selector for the canvas element (e.g., "canvas" or "#my-canvas")
    ///
    /// # Errors
    /// * `Error::Initialization` - Canvas element not found, or WebGL2 unavailable
    pub fn create(canvas_id: &str) -> Result<Self, Error> {
        let canvas = js::get_canvas_by_id(canvas_id)?;
        Self::create_with_canvas(canvas)
    }

    /// Creates a new renderer from an existing HTML canvas element.
    pub fn create_with_canvas(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let (width, height) = (canvas.width(), canvas.height());

        let gl = js::get_webgl2_context(&canvas)?;
        let mut state = GlState::new(&gl);
        state.init_pipeline(&gl);

        let mut renderer = Self {
            gl,
            canvas,
            state,
            clear_color: (0.0, 0.0, 0.0),
        };
        renderer.resize(width as _, height as _);
        Ok(renderer)
    }

    /// Sets the color used to clear the framebuffer, as `0xRRGGBB`.
    pub fn clear_color(mut self, color: u32) -> Self {
        self.clear_color = rgb_components(color);
        self
    }

    /// Resizes the canvas and updates the viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.state.viewport(&self.gl, 0, 0, width, height);
    }

    /// Clears both the color and the depth buffer.
    pub fn begin_frame(&mut self) {
        let (r, g, b) = self.clear_color;
        self.state.clear_color(&self.gl, r, g, b, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    /// Renders a drawable object.
    ///
    /// Calls the drawable's prepare, draw, and cleanup methods in sequence.
    pub(crate) fn render(&mut self, drawable: &impl Drawable) {
        let mut context = RenderContext { gl: &self.gl, state: &mut self.state };

        drawable.prepare(&mut context);
        drawable.draw(&mut context);
        drawable.cleanup(&mut context);
    }

    /// Returns a reference to the WebGL2 rendering context.
    pub fn gl(&self) -> &GL {
        &self.gl
    }

    /// Returns a reference to the HTML canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current canvas dimensions as `(width, height)` in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width() as i32, self.canvas.height() as i32)
    }
}

/// Trait for objects that can be rendered by the renderer.
pub(crate) trait Drawable {
    /// Binds buffers and uploads per-draw uniforms.
    fn prepare(&self, context: &mut RenderContext);

    /// Issues the draw calls. State is already set up by `prepare()`.
    fn draw(&self, context: &mut RenderContext);

    /// Unbinds whatever `prepare()` bound.
    fn cleanup(&self, context: &mut RenderContext);
}

/// Splits `0xRRGGBB` into normalized components.
pub(crate) fn rgb_components(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}
