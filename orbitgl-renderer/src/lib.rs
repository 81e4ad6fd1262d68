//! WebGL2 front end of the orbitgl demo.
//!
//! Builds the demo scene from [`orbitgl_core`], uploads it to the GPU and
//! re-renders whenever a key is pressed. W/A/S/D orbit the camera around the
//! origin.

mod app;
mod error;
mod gl;
mod input;

pub(crate) mod js;

#[cfg(feature = "js-api")]
pub mod wasm;

pub use app::*;
pub use orbitgl_core::{
    Camera, FillStyle, Mat4, OrbitControl, ProjectionType, Scene, SphereNormals, Vec3,
};

pub use crate::{error::Error, gl::Renderer};
