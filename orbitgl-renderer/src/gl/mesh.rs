use orbitgl_core::{FillStyle, Geometry, Mat4};
use web_sys::{WebGlBuffer, WebGlUniformLocation};

use crate::{
    error::Error,
    gl::{
        attrib, create_index_buffer, create_vertex_buffer, Drawable, RenderContext, ShaderProgram,
        GL,
    },
};

/// GPU buffers of one model's geometry.
#[derive(Debug)]
pub(crate) struct MeshBuffers {
    positions: WebGlBuffer,
    normals: WebGlBuffer,
    lines: IndexBuffer,
    tris: IndexBuffer,
}

#[derive(Debug)]
struct IndexBuffer {
    buffer: WebGlBuffer,
    count: i32,
}

impl IndexBuffer {
    fn new(gl: &GL, indices: &[u16]) -> Result<Self, Error> {
        Ok(Self {
            buffer: create_index_buffer(gl, indices)?,
            count: indices.len() as i32,
        })
    }

    fn draw(&self, gl: &GL, mode: u32) {
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&self.buffer));
        gl.draw_elements_with_i32(mode, self.count, GL::UNSIGNED_SHORT, 0);
    }
}

impl MeshBuffers {
    pub(crate) fn upload(gl: &GL, geometry: &Geometry) -> Result<Self, Error> {
        Ok(Self {
            positions: create_vertex_buffer(gl, &geometry.vertices)?,
            normals: create_vertex_buffer(gl, &geometry.normals)?,
            lines: IndexBuffer::new(gl, &geometry.indices_lines)?,
            tris: IndexBuffer::new(gl, &geometry.indices_tris)?,
        })
    }
}

/// The scene shader: depth-shaded grayscale from projection and model-view.
#[derive(Debug)]
pub(crate) struct SceneShader {
    program: ShaderProgram,
    projection_loc: WebGlUniformLocation,
    model_view_loc: WebGlUniformLocation,
}

impl SceneShader {
    const VERTEX_GLSL: &'static str = include_str!("../shaders/scene.vert");
    const FRAGMENT_GLSL: &'static str = include_str!("../shaders/scene.frag");

    pub(crate) fn new(gl: &GL) -> Result<Self, Error> {
        let program = ShaderProgram::create(gl, Self::VERTEX_GLSL, Self::FRAGMENT_GLSL)?;
        program.use_program(gl);

        let projection_loc = program.uniform_location(gl, "uPMatrix")?;
        let model_view_loc = program.uniform_location(gl, "uMVMatrix")?;

        Ok(Self { program, projection_loc, model_view_loc })
    }

    /// Activates the program and uploads the projection matrix for this frame.
    pub(crate) fn begin(&self, gl: &GL, projection: &Mat4) {
        self.program.use_program(gl);
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.projection_loc),
            false,
            projection.as_slice(),
        );
    }
}

/// A single model draw: its buffers, fill style and model-view matrix.
pub(crate) struct ModelDraw<'a> {
    pub shader: &'a SceneShader,
    pub mesh: &'a MeshBuffers,
    pub fill_style: &'a FillStyle,
    pub model_view: &'a Mat4,
}

impl Drawable for ModelDraw<'_> {
    fn prepare(&self, context: &mut RenderContext) {
        let gl = context.gl;

        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.shader.model_view_loc),
            false,
            self.model_view.as_slice(),
        );

        context.state.vertex_attrib_array(gl, attrib::POSITION, true);
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.mesh.positions));
        gl.vertex_attrib_pointer_with_i32(attrib::POSITION, 3, GL::FLOAT, false, 0, 0);

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.mesh.normals));
        gl.vertex_attrib_pointer_with_i32(attrib::NORMAL, 3, GL::FLOAT, false, 0, 0);
    }

    fn draw(&self, context: &mut RenderContext) {
        let gl = context.gl;

        if self.fill_style.draws_triangles() {
            context.state.vertex_attrib_array(gl, attrib::NORMAL, true);
            self.mesh.tris.draw(gl, GL::TRIANGLES);
        }

        // lines carry a constant zero normal
        if self.fill_style.draws_lines() {
            context.state.vertex_attrib_array(gl, attrib::NORMAL, false);
            gl.vertex_attrib3f(attrib::NORMAL, 0.0, 0.0, 0.0);
            self.mesh.lines.draw(gl, GL::LINES);
        }
    }

    fn cleanup(&self, context: &mut RenderContext) {
        let gl = context.gl;
        gl.bind_buffer(GL::ARRAY_BUFFER, None);
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, None);
    }
}
