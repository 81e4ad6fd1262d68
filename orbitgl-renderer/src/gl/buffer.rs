use std::slice;

use web_sys::WebGlBuffer;

use crate::{error::Error, gl::GL};

/// Uploads an array of elements to the buffer bound at `target` as raw bytes.
///
/// # Safety
/// Assumes the elements are aligned and have a memory layout compatible with
/// WebGL. No padding/alignment checks are performed.
pub(crate) fn buffer_upload_array<T>(gl: &GL, target: u32, data: &[T], usage: u32) {
    unsafe {
        let data_ptr = data.as_ptr() as *const u8;
        let size = std::mem::size_of_val(data);
        let view = js_sys::Uint8Array::view(slice::from_raw_parts(data_ptr, size));
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }
}

/// Creates a `STATIC_DRAW` vertex buffer holding `data`.
pub(crate) fn create_vertex_buffer(gl: &GL, data: &[f32]) -> Result<WebGlBuffer, Error> {
    create_static_buffer(gl, GL::ARRAY_BUFFER, data, "vbo-f32")
}

/// Creates a `STATIC_DRAW` element buffer holding 16-bit `indices`.
pub(crate) fn create_index_buffer(gl: &GL, indices: &[u16]) -> Result<WebGlBuffer, Error> {
    create_static_buffer(gl, GL::ELEMENT_ARRAY_BUFFER, indices, "ibo-u16")
}

fn create_static_buffer<T>(
    gl: &GL,
    target: u32,
    data: &[T],
    label: &str,
) -> Result<WebGlBuffer, Error> {
    let buffer = gl.create_buffer().ok_or(Error::buffer_creation_failed(label))?;

    gl.bind_buffer(target, Some(&buffer));
    buffer_upload_array(gl, target, data, GL::STATIC_DRAW);
    gl.bind_buffer(target, None);

    Ok(buffer)
}
