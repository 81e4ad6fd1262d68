use web_sys::{console, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::{error::Error, gl::GL};

/// Fixed vertex attribute locations, bound before linking.
pub(crate) mod attrib {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
}

#[derive(Debug)]
pub(crate) struct ShaderProgram {
    pub(crate) program: WebGlProgram,
}

impl ShaderProgram {
    pub(crate) fn create(
        gl: &GL,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let program = gl.create_program().ok_or(Error::shader_program_creation_failed())?;

        // compile shaders
        let vertex_shader = compile_shader(gl, ShaderType::Vertex, vertex_source)?;
        let fragment_shader = compile_shader(gl, ShaderType::Fragment, fragment_source)?;

        // attach shaders, pin attribute locations and link program
        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.bind_attrib_location(&program, attrib::POSITION, "aPosition");
        gl.bind_attrib_location(&program, attrib::NORMAL, "aNormal");
        gl.link_program(&program);
        check_link_status(gl, &program)?;

        // delete shaders (no longer needed after linking)
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));

        Ok(ShaderProgram { program })
    }

    /// Use the shader program.
    pub(crate) fn use_program(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }

    pub(crate) fn uniform_location(
        &self,
        gl: &GL,
        name: &str,
    ) -> Result<WebGlUniformLocation, Error> {
        gl.get_uniform_location(&self.program, name)
            .ok_or(Error::uniform_location_failed(name))
    }
}

fn compile_shader(gl: &GL, shader_type: ShaderType, source: &str) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(shader_type.into())
        .ok_or(Error::shader_creation_failed(shader_type.name()))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);

    if !compiled {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        console::error_1(&format!("{}: {log}", shader_type.name()).into());
        gl.delete_shader(Some(&shader));
        return Err(Error::shader_compile_failed(shader_type.name(), log));
    }

    Ok(shader)
}

fn check_link_status(gl: &GL, program: &WebGlProgram) -> Result<(), Error> {
    let linked = gl
        .get_program_parameter(program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);

    if !linked {
        let log = gl.get_program_info_log(program).unwrap_or_default();
        console::error_1(&format!("link: {log}").into());
        return Err(Error::shader_link_failed(log));
    }

    Ok(())
}

/// Enum representing the type of shader.
#[derive(Debug, Clone, Copy)]
enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    fn name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex",
            ShaderType::Fragment => "fragment",
        }
    }
}

impl From<ShaderType> for u32 {
    fn from(shader_type: ShaderType) -> u32 {
        match shader_type {
            ShaderType::Vertex => GL::VERTEX_SHADER,
            ShaderType::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}
