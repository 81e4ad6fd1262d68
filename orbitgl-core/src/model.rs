use compact_str::CompactString;

use crate::{Geometry, Mat4, Vec3};

/// Draw mode tag of a model.
///
/// Matching is by substring: any tag containing `"fill"` draws triangles and
/// any tag containing `"wireframe"` draws lines, so `"fillwireframe"` does both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillStyle(CompactString);

impl FillStyle {
    pub const FILL: &'static str = "fill";
    pub const WIREFRAME: &'static str = "wireframe";
    pub const FILL_WIREFRAME: &'static str = "fillwireframe";

    pub fn new(tag: &str) -> Self {
        Self(tag.into())
    }

    pub fn fill() -> Self {
        Self::new(Self::FILL)
    }

    pub fn wireframe() -> Self {
        Self::new(Self::WIREFRAME)
    }

    pub fn draws_triangles(&self) -> bool {
        self.0.contains(Self::FILL)
    }

    pub fn draws_lines(&self) -> bool {
        self.0.contains(Self::WIREFRAME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FillStyle {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Translation, per-axis rotation (radians) and scale of a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec3,
    pub rotate: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec3::ZERO,
            rotate: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A drawable model: static geometry plus per-frame matrices.
#[derive(Debug, Clone)]
pub struct Model {
    pub geometry: Geometry,
    pub fill_style: FillStyle,
    pub transform: Transform,
    pub model_matrix: Mat4,
    pub model_view: Mat4,
}

impl Model {
    pub fn new(geometry: Geometry, fill_style: impl Into<FillStyle>, transform: Transform) -> Self {
        Self {
            geometry,
            fill_style: fill_style.into(),
            transform,
            model_matrix: Mat4::new_identity(),
            model_view: Mat4::new_identity(),
        }
    }

    /// Recomputes the model and model-view matrices against `view`.
    ///
    /// The model matrix is rebuilt from identity as
    /// translate → rotateX → rotateY → rotateZ → scale; reordering changes
    /// the rendered result.
    pub fn update_transformations(&mut self, view: &Mat4) -> &Mat4 {
        let t = &self.transform;
        self.model_matrix
            .set_identity()
            .translate(t.translate)
            .rotate_x(t.rotate.x)
            .rotate_y(t.rotate.y)
            .rotate_z(t.rotate.z)
            .scale(t.scale);

        self.model_view.multiply(view, &self.model_matrix);
        &self.model_view
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_fill_style_substring_match() {
        let fill = FillStyle::fill();
        assert!(fill.draws_triangles() && !fill.draws_lines());

        let wire = FillStyle::wireframe();
        assert!(!wire.draws_triangles() && wire.draws_lines());

        let both = FillStyle::from(FillStyle::FILL_WIREFRAME);
        assert!(both.draws_triangles() && both.draws_lines());

        let neither = FillStyle::from("points");
        assert!(!neither.draws_triangles() && !neither.draws_lines());

        // exact match is not required
        assert!(FillStyle::from("solid-fill").draws_triangles());
    }

    #[test]
    fn test_transform_order() {
        let transform = Transform {
            translate: Vec3::new(0.0, 0.0, 5.0),
            rotate: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vec3::splat(2.0),
        };
        let mut model = Model::new(Geometry::default(), "fill", transform);
        model.update_transformations(&Mat4::new_identity());

        // scale first: (1,0,0) -> (2,0,0); rotate about Y: -> (0,0,-2); translate: -> (0,0,3)
        let p = model.model_matrix.transform_vec4([1.0, 0.0, 0.0, 1.0]);
        assert!(p[0].abs() < 1e-5, "{p:?}");
        assert!((p[2] - 3.0).abs() < 1e-5, "{p:?}");
    }

    #[test]
    fn test_model_view_is_view_after_model() {
        let transform = Transform {
            translate: Vec3::new(0.0, -0.8, 0.0),
            ..Transform::default()
        };
        let mut model = Model::new(Geometry::default(), "wireframe", transform);
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, Vec3::Y);

        let mv = *model.update_transformations(&view);
        assert_eq!(mv, view * model.model_matrix);

        let p = mv.transform_vec4([0.0, 0.0, 0.0, 1.0]);
        assert!((p[1] + 0.8).abs() < 1e-6);
        assert!((p[2] + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_update_resets_previous_frame() {
        let mut model = Model::new(Geometry::default(), "fill", Transform::default());
        model.model_matrix = Mat4::from_cols_array([3.0; 16]);

        model.update_transformations(&Mat4::new_identity());
        assert_eq!(model.model_matrix, Mat4::new_identity());
        assert_eq!(model.model_view, Mat4::new_identity());
    }
}
