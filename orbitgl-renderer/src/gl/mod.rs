mod buffer;
mod context;
mod mesh;
mod program;
mod renderer;

use buffer::*;
pub(crate) use mesh::*;
pub(crate) use program::*;
pub use renderer::Renderer;
pub(crate) use renderer::{Drawable, RenderContext};

pub(crate) type GL = web_sys::WebGl2RenderingContext;
