//! Math and scene core of the orbitgl WebGL demo.
//!
//! Everything here is plain Rust without browser dependencies: the
//! column-major [`Mat4`] library, the plane and sphere generators, the orbit
//! [`Camera`] and the [`Scene`] that recomputes all transforms per frame.

mod camera;
mod error;
mod mat4;
mod model;
mod scene;
mod vec3;

pub mod geometry;
pub mod input;

pub use camera::{Camera, ProjectionType};
pub use error::{GeometryError, ParseProjectionError};
pub use geometry::{Geometry, Plane, Sphere, SphereNormals};
pub use input::{OrbitControl, DEFAULT_ORBIT_STEP};
pub use mat4::Mat4;
pub use model::{FillStyle, Model, Transform};
pub use scene::Scene;
pub use vec3::Vec3;
