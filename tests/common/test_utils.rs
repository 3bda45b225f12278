use dae_scene::{
    LoadOptions,
    data_structures::{
        document::{
            Document, Geometry, MeshElement, Node, PolylistElement, SharedInput, Source, UpAxis,
            Url, Vertices, VisualScene,
        },
        mesh::Mesh,
    },
    error::{Diagnostic, LoadError},
    resources::registry::Registry,
};

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Position `i` is `(i, 2i, 3i)`.
pub(crate) fn positions(count: usize) -> Vec<f64> {
    (0..count)
        .flat_map(|i| {
            let i = i as f64;
            [i, 2.0 * i, 3.0 * i]
        })
        .collect()
}

/// Normal `i` is `(0, 0, i + 1)`.
pub(crate) fn normals(count: usize) -> Vec<f64> {
    (0..count).flat_map(|i| [0.0, 0.0, i as f64 + 1.0]).collect()
}

/// A polylist reading `VERTEX` at offset 0 and `NORMAL` at offset 1 of `geometry`'s sources.
pub(crate) fn polylist(geometry: &str, vcount: Vec<usize>, p: Vec<usize>) -> PolylistElement {
    PolylistElement {
        material: None,
        inputs: vec![
            SharedInput::new("VERTEX", 0, &format!("{geometry}-vertices")),
            SharedInput::new("NORMAL", 1, &format!("{geometry}-normals")),
        ],
        vcount,
        p,
    }
}

/// Interleaves `(position, normal)` index pairs into a corner index stream.
pub(crate) fn corners(pairs: &[(usize, usize)]) -> Vec<usize> {
    pairs.iter().flat_map(|&(v, n)| [v, n]).collect()
}

pub(crate) fn geometry_with(
    id: &str,
    position_count: usize,
    normal_count: usize,
    polylists: Vec<PolylistElement>,
) -> Geometry {
    let positions_id = format!("{id}-positions");
    Geometry::new(
        id,
        MeshElement {
            sources: vec![
                Source::new(&positions_id, positions(position_count)),
                Source::new(&format!("{id}-normals"), normals(normal_count)),
            ],
            vertices: Vertices::positions(&format!("{id}-vertices"), &positions_id),
            polylists,
        },
    )
}

/// A single triangle with three distinct (position, normal) pairs.
pub(crate) fn triangle(id: &str) -> Geometry {
    geometry_with(
        id,
        3,
        3,
        vec![polylist(id, vec![3], corners(&[(0, 0), (1, 1), (2, 2)]))],
    )
}

/// A document whose root visual scene `scene` holds `nodes`.
pub(crate) fn document(nodes: Vec<Node>, geometries: Vec<Geometry>) -> Document {
    let mut scene = VisualScene::new("scene");
    scene.nodes = nodes;
    Document {
        visual_scenes: vec![scene],
        geometries,
        scene: Some(Url::fragment("scene")),
        ..Default::default()
    }
}

pub(crate) fn document_up(
    up_axis: UpAxis,
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
) -> Document {
    let mut document = document(nodes, geometries);
    document.asset.up_axis = up_axis;
    document
}

/// Builds the mesh of `geometry` the way a load does.
pub(crate) fn build(geometry: Geometry) -> Result<(Mesh, Vec<Diagnostic>), LoadError> {
    build_with(geometry, &LoadOptions::default())
}

pub(crate) fn build_with(
    geometry: Geometry,
    options: &LoadOptions,
) -> Result<(Mesh, Vec<Diagnostic>), LoadError> {
    let id = geometry.id.clone().unwrap_or_default();
    let document = document(Vec::new(), vec![geometry]);
    let registry = Registry::index(&document, options)?;
    let mesh = registry.mesh(&id).cloned().unwrap_or_default();
    Ok((mesh, registry.diagnostics().to_vec()))
}
