use std::{f32::consts::PI, fmt, str::FromStr};

use crate::{error::ParseProjectionError, input::OrbitControl, Mat4, Vec3};

/// Projection applied by [`Camera::update_projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    Ortho,
    Frustum,
    #[default]
    Perspective,
}

impl ProjectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionType::Ortho => "ortho",
            ProjectionType::Frustum => "frustum",
            ProjectionType::Perspective => "perspective",
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionType {
    type Err = ParseProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ortho" => Ok(ProjectionType::Ortho),
            "frustum" => Ok(ProjectionType::Frustum),
            "perspective" => Ok(ProjectionType::Perspective),
            other => Err(ParseProjectionError(other.into())),
        }
    }
}

/// Camera orbiting a fixed center, with cached view and projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Viewport width over height.
    pub aspect: f32,
    /// Half extent of the ortho box; the frustum near plane spans `lrtb`.
    pub lrtb: f32,
    pub near: f32,
    pub far: f32,
    pub projection: ProjectionType,
    /// Orbit angle around the center in the XZ plane, in radians.
    pub z_angle: f32,
    /// Elevation angle driving the eye's y offset, in radians.
    pub y_angle: f32,
    /// Orbit distance from the center.
    pub distance: f32,
    pub view: Mat4,
    pub projection_matrix: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 4.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 60.0 * PI / 180.0,
            aspect: 1.0,
            lrtb: 2.0,
            near: 1.0,
            far: 10.0,
            projection: ProjectionType::default(),
            z_angle: 0.0,
            y_angle: 0.0,
            distance: 4.0,
            view: Mat4::new_identity(),
            projection_matrix: Mat4::new_identity(),
        }
    }
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            ..Self::default()
        }
    }

    /// Rebuilds the cached projection matrix from the projection type and bounds.
    pub fn update_projection(&mut self) -> &Mat4 {
        let v = self.lrtb;
        match self.projection {
            ProjectionType::Ortho => {
                self.projection_matrix.set_ortho(-v, v, -v, v, -self.far, self.far);
            },
            ProjectionType::Frustum => {
                let h = v / 2.0;
                self.projection_matrix.set_frustum(-h, h, -h, h, self.near, self.far);
            },
            ProjectionType::Perspective => {
                self.projection_matrix
                    .set_perspective(self.fovy, self.aspect, self.near, Some(self.far));
            },
        }
        &self.projection_matrix
    }

    /// Places the eye around the center from the two orbit angles.
    ///
    /// Each angle drives its own axes: `z_angle` moves the eye in x and z,
    /// `y_angle` in y. This is not a spherical parametrization.
    pub fn update_orbit(&mut self) {
        let d = self.distance;
        self.eye = Vec3::new(
            self.center.x + d * self.z_angle.sin(),
            self.center.y + d * self.y_angle.sin(),
            self.center.z + d * self.z_angle.cos(),
        );
    }

    /// Rebuilds the cached view matrix from eye, center and up.
    pub fn update_view(&mut self) -> &Mat4 {
        self.view.set_look_at(self.eye, self.center, self.up);
        &self.view
    }

    /// Applies one orbit step of `step` radians.
    pub fn apply(&mut self, control: OrbitControl, step: f32) {
        match control {
            OrbitControl::ElevationDown => self.y_angle -= step,
            OrbitControl::AzimuthUp => self.z_angle += step,
            OrbitControl::ElevationUp => self.y_angle += step,
            OrbitControl::AzimuthDown => self.z_angle -= step,
        }
    }
}
