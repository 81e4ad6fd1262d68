use crate::{
    error::GeometryError,
    geometry::{Plane, Sphere, SphereNormals},
    input::OrbitControl,
    Camera, FillStyle, Model, Transform, Vec3,
};

/// Camera plus models, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub camera: Camera,
    pub models: Vec<Model>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self { camera, models: Vec::new() }
    }

    /// The demo scene: a wireframe ground plane below three filled spheres
    /// of decreasing size lined up along z.
    pub fn demo(camera: Camera, sphere_normals: SphereNormals) -> Result<Self, GeometryError> {
        let mut scene = Self::new(camera);

        scene.add_model(Model::new(
            Plane::default().create_vertex_data()?,
            FillStyle::WIREFRAME,
            Transform {
                translate: Vec3::new(0.0, -0.8, 0.0),
                ..Transform::default()
            },
        ));

        let sphere = Sphere::with_normals(sphere_normals).create_vertex_data()?;
        for (z, scale) in [(-1.5, 0.75), (0.0, 0.5), (1.5, 0.25)] {
            scene.add_model(Model::new(
                sphere.clone(),
                FillStyle::FILL,
                Transform {
                    translate: Vec3::new(0.0, 0.0, z),
                    scale: Vec3::splat(scale),
                    ..Transform::default()
                },
            ));
        }

        Ok(scene)
    }

    pub fn add_model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Applies an orbit command to the camera.
    pub fn orbit(&mut self, control: OrbitControl, step: f32) {
        self.camera.apply(control, step);
    }

    /// Per-frame transform update: projection, orbit, view, then every model.
    pub fn update_frame(&mut self) {
        let camera = &mut self.camera;
        camera.update_projection();
        camera.update_orbit();
        let view = *camera.update_view();

        for model in self.models.iter_mut() {
            model.update_transformations(&view);
        }
    }
}
