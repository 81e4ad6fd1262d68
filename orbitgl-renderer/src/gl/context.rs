use crate::gl::GL;

/// Guaranteed minimum of `MAX_VERTEX_ATTRIBS` in WebGL2.
const MIN_VERTEX_ATTRIBS: usize = 16;

/// Manages simple WebGL state to reduce redundant state changes
#[derive(Debug)]
pub struct GlState {
    // Viewport dimensions
    viewport: [i32; 4], // [x, y, width, height]

    // Clear color
    clear_color: [f32; 4],

    // Enabled vertex attribute arrays
    enabled_vertex_attribs: Vec<bool>,
}

impl GlState {
    /// Create a new GLState object with WebGL defaults
    pub fn new(gl: &GL) -> Self {
        let max_vertex_attribs = gl
            .get_parameter(GL::MAX_VERTEX_ATTRIBS)
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(MIN_VERTEX_ATTRIBS, |v| v as usize);

        Self {
            viewport: [0, 0, 0, 0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            enabled_vertex_attribs: vec![false; max_vertex_attribs],
        }
    }

    /// Set viewport dimensions
    pub fn viewport(&mut self, gl: &GL, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        let new_viewport = [x, y, width, height];
        if self.viewport != new_viewport {
            gl.viewport(x, y, width, height);
            self.viewport = new_viewport;
        }
        self
    }

    /// Set clear color
    pub fn clear_color(&mut self, gl: &GL, r: f32, g: f32, b: f32, a: f32) -> &mut Self {
        let new_color = [r, g, b, a];
        if self.clear_color != new_color {
            gl.clear_color(r, g, b, a);
            self.clear_color = new_color;
        }
        self
    }

    /// Enable or disable a vertex attribute array
    pub fn vertex_attrib_array(&mut self, gl: &GL, index: u32, enable: bool) -> &mut Self {
        let idx = index as usize;
        if idx < self.enabled_vertex_attribs.len() && self.enabled_vertex_attribs[idx] != enable {
            if enable {
                gl.enable_vertex_attrib_array(index);
            } else {
                gl.disable_vertex_attrib_array(index);
            }
            self.enabled_vertex_attribs[idx] = enable;
        }
        self
    }

    /// Fixed pipeline setup: counter-clockwise front faces with back-face
    /// culling, depth testing, and a polygon offset pushing filled faces
    /// behind coincident lines.
    pub fn init_pipeline(&mut self, gl: &GL) -> &mut Self {
        gl.front_face(GL::CCW);
        self.capability(gl, GL::CULL_FACE, true);
        gl.cull_face(GL::BACK);

        self.capability(gl, GL::DEPTH_TEST, true);

        self.capability(gl, GL::POLYGON_OFFSET_FILL, true);
        gl.polygon_offset(0.5, 0.0);
        self
    }

    fn capability(&self, gl: &GL, capability: u32, enable: bool) {
        if enable {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}
