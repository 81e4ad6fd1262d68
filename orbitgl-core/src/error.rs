use compact_str::CompactString;

/// Geometry generation errors.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// A grid needs at least one subdivision along each axis.
    #[error("{n}x{m} grid has no cells")]
    EmptyGrid { n: u16, m: u16 },

    /// The parameter grid has more vertices than 16-bit indices can address.
    #[error("{n}x{m} grid needs {vertex_count} vertices, exceeding the u16 index range")]
    TooManyVertices { n: u16, m: u16, vertex_count: usize },
}

/// Returned when a projection name is not one of `ortho`, `frustum` or `perspective`.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown projection type: {0}")]
pub struct ParseProjectionError(pub CompactString);
