//! Welded triangle meshes produced from document geometries.

/// Components per position and per normal.
pub const DIMENSIONS: usize = 3;

/// Triangle data decoded from one polygon list.
///
/// `positions[3i..3i + 3]` and `normals[3i..3i + 3]` describe the same output
/// vertex `i`; `triangles` holds three compact vertex indices per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polylist {
    pub positions: Vec<f64>,
    pub normals: Vec<f64>,
    pub triangles: Vec<i16>,
}

impl Polylist {
    /// Number of distinct output vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / DIMENSIONS
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// All polygon lists of one geometry, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Identifier of the geometry's `<vertices>` element.
    pub vertices_id: String,
    pub polylists: Vec<Polylist>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.polylists.iter().map(Polylist::triangle_count).sum()
    }
}
