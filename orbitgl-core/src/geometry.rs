use std::f32::consts::PI;

use crate::error::GeometryError;

/// Flat vertex and index arrays ready for upload to GPU buffers.
///
/// Positions and normals hold 3 floats per vertex. `indices_lines` holds 2
/// indices per edge for wireframe drawing, `indices_tris` 3 per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices_lines: Vec<u16>,
    pub indices_tris: Vec<u16>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn line_index_count(&self) -> usize {
        self.indices_lines.len()
    }

    pub fn triangle_index_count(&self) -> usize {
        self.indices_tris.len()
    }
}

/// Flat XZ grid centered on the origin, all normals pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Subdivisions along x.
    pub n: u16,
    /// Subdivisions along z.
    pub m: u16,
    /// Edge length of the square grid.
    pub extent: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self { n: 100, m: 100, extent: 20.0 }
    }
}

impl Plane {
    pub fn create_vertex_data(&self) -> Result<Geometry, GeometryError> {
        let half = self.extent / 2.0;
        let du = self.extent / self.n as f32;
        let dv = self.extent / self.m as f32;

        build_grid(self.n, self.m, |i, j| {
            let u = -half + i as f32 * du;
            let v = -half + j as f32 * dv;
            ([u, 0.0, v], [0.0, 1.0, 0.0])
        })
    }
}

/// How the sphere generator fills the normal array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SphereNormals {
    /// Constant `(0.5, 0.5, 0.5)` for every vertex.
    #[default]
    Placeholder,
    /// Unit outward normal of the sphere.
    Outward,
}

/// Unit-parameter sphere: `u` sweeps the azimuth, `v` the polar angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub n: u16,
    pub m: u16,
    pub radius: f32,
    pub normals: SphereNormals,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            n: 30,
            m: 30,
            radius: 1.0,
            normals: SphereNormals::default(),
        }
    }
}

impl Sphere {
    pub fn with_normals(normals: SphereNormals) -> Self {
        Self { normals, ..Self::default() }
    }

    pub fn create_vertex_data(&self) -> Result<Geometry, GeometryError> {
        let du = 2.0 * PI / self.n as f32;
        let dv = PI / self.m as f32;
        let r = self.radius;
        let normals = self.normals;

        build_grid(self.n, self.m, |i, j| {
            let (sin_u, cos_u) = (i as f32 * du).sin_cos();
            let (sin_v, cos_v) = (j as f32 * dv).sin_cos();

            let position = [r * sin_v * cos_u, r * sin_v * sin_u, r * cos_v];
            let normal = match normals {
                SphereNormals::Placeholder => [0.5, 0.5, 0.5],
                SphereNormals::Outward => [sin_v * cos_u, sin_v * sin_u, cos_v],
            };
            (position, normal)
        })
    }
}

/// Walks an `(n+1) x (m+1)` parameter grid, `i` outer and `j` inner.
///
/// Connecting primitives are only emitted once both `i` and `j` exceed zero,
/// i.e. when vertex `i*(m+1)+j` closes a quad with its three predecessors.
fn build_grid(
    n: u16,
    m: u16,
    mut vertex_at: impl FnMut(u16, u16) -> ([f32; 3], [f32; 3]),
) -> Result<Geometry, GeometryError> {
    if n == 0 || m == 0 {
        return Err(GeometryError::EmptyGrid { n, m });
    }

    let (cols, rows) = (n as usize + 1, m as usize + 1);
    let vertex_count = cols * rows;
    if vertex_count > u16::MAX as usize + 1 {
        return Err(GeometryError::TooManyVertices { n, m, vertex_count });
    }

    let quads = n as usize * m as usize;
    let mut geometry = Geometry {
        vertices: Vec::with_capacity(3 * vertex_count),
        normals: Vec::with_capacity(3 * vertex_count),
        indices_lines: Vec::with_capacity(2 * 2 * quads),
        indices_tris: Vec::with_capacity(3 * 2 * quads),
    };

    for i in 0..=n {
        for j in 0..=m {
            let (position, normal) = vertex_at(i, j);
            geometry.vertices.extend_from_slice(&position);
            geometry.normals.extend_from_slice(&normal);

            if i == 0 || j == 0 {
                continue;
            }

            let v = i as usize * rows + j as usize;
            let [v, prev, below, below_prev] = [v, v - 1, v - rows, v - rows - 1].map(|idx| idx as u16);

            // beam, then ring
            geometry.indices_lines.extend_from_slice(&[prev, v, below, v]);

            #[rustfmt::skip]
            geometry.indices_tris.extend_from_slice(&[
                v,    prev,       below,
                prev, below_prev, below,
            ]);
        }
    }

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        let plane = Plane::default().create_vertex_data().unwrap();

        assert_eq!(plane.vertices.len(), 101 * 101 * 3);
        assert_eq!(plane.normals.len(), 101 * 101 * 3);
        assert_eq!(plane.triangle_index_count(), 100 * 100 * 6);
        assert_eq!(plane.line_index_count(), 100 * 100 * 4);
        assert_eq!(plane.vertex_count(), 101 * 101);
    }

    #[test]
    fn test_plane_spans_extent_on_xz() {
        let plane = Plane::default().create_vertex_data().unwrap();

        assert_eq!(&plane.vertices[..3], &[-10.0, 0.0, -10.0]);
        let last = plane.vertices.len() - 3;
        assert!((plane.vertices[last] - 10.0).abs() < 1e-4);
        assert!((plane.vertices[last + 2] - 10.0).abs() < 1e-4);
        assert!(plane.vertices.chunks(3).all(|p| p[1] == 0.0));
        assert!(plane.normals.chunks(3).all(|n| n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_first_row_and_column_emit_no_primitives() {
        let geometry = Plane { n: 2, m: 3, extent: 2.0 }.create_vertex_data().unwrap();

        // the first primitive belongs to vertex i=1, j=1 (index m+2)
        let v = 3 + 2;
        assert_eq!(&geometry.indices_lines[..4], &[v - 1, v, v - 4, v]);
        assert_eq!(&geometry.indices_tris[..6], &[v, v - 1, v - 4, v - 1, v - 5, v - 4]);
    }

    #[test]
    fn test_indices_stay_in_range() {
        let sphere = Sphere::default().create_vertex_data().unwrap();
        let count = sphere.vertex_count() as u16;

        assert!(sphere.indices_lines.iter().all(|&i| i < count));
        assert!(sphere.indices_tris.iter().all(|&i| i < count));
        assert_eq!(sphere.triangle_index_count(), 30 * 30 * 6);
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let sphere = Sphere { radius: 2.0, ..Sphere::default() }.create_vertex_data().unwrap();

        for p in sphere.vertices.chunks(3) {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 2.0).abs() < 1e-5, "{p:?}");
        }
        // v = 0 is the +z pole
        assert_eq!(&sphere.vertices[..3], &[0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_sphere_placeholder_normals() {
        let sphere = Sphere::default().create_vertex_data().unwrap();
        assert!(sphere.normals.chunks(3).all(|n| n == [0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_sphere_outward_normals() {
        let sphere = Sphere { radius: 3.0, ..Sphere::with_normals(SphereNormals::Outward) }
            .create_vertex_data()
            .unwrap();

        for (p, n) in sphere.vertices.chunks(3).zip(sphere.normals.chunks(3)) {
            for axis in 0..3 {
                assert!((p[axis] / 3.0 - n[axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_too_many_vertices() {
        let result = Plane { n: 300, m: 300, extent: 1.0 }.create_vertex_data();
        assert!(matches!(
            result,
            Err(GeometryError::TooManyVertices { vertex_count: 90601, .. })
        ));

        // 256 x 256 vertices fill the u16 index range exactly
        assert!(Plane { n: 255, m: 255, extent: 1.0 }.create_vertex_data().is_ok());
    }

    #[test]
    fn test_zero_subdivisions_are_rejected() {
        let plane = Plane { n: 0, m: 4, extent: 2.0 }.create_vertex_data();
        assert_eq!(plane, Err(GeometryError::EmptyGrid { n: 0, m: 4 }));

        let sphere = Sphere { m: 0, ..Sphere::default() }.create_vertex_data();
        assert_eq!(sphere, Err(GeometryError::EmptyGrid { n: 30, m: 0 }));

        // a single cell is the smallest valid grid
        let cell = Plane { n: 1, m: 1, extent: 2.0 }.create_vertex_data().unwrap();
        assert!(cell.vertices.iter().all(|c| c.is_finite()));
        assert_eq!(cell.triangle_index_count(), 6);
    }
}
