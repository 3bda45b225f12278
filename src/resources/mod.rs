//! Scene loading: turns a parsed document into a renderer-ready [`Model`] tree.
//!
//! Loading runs in three steps:
//! 1. [`Registry::index`] registers every identified node and geometry,
//!    caching node transforms and building one [`Mesh`](crate::data_structures::mesh::Mesh)
//!    per geometry
//! 2. every non-empty polylist is handed to the [`BufferAllocator`] once,
//!    producing reusable geometry templates
//! 3. the root visual scene is walked, instancing templates at the nodes that
//!    reference them and pruning branches that end up drawing nothing
//!
//! A load either returns a complete tree or a single [`LoadError`].

use std::collections::HashMap;

use crate::{
    data_structures::{
        document::{Document, Node},
        mesh::Polylist,
        model::{DrawElements, Geometry, Model, Primitive},
        transform::up_axis_correction,
    },
    error::{Diagnostic, LoadError},
    options::LoadOptions,
    resources::{
        registry::{Object, Registry},
        upload::BufferAllocator,
    },
};

pub mod mesh;
pub mod registry;
pub mod upload;

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedScene<B> {
    /// Always present; carries the up-axis correction.
    pub root: Model<B>,
    /// Non-fatal findings, in the order they were encountered.
    pub diagnostics: Vec<Diagnostic>,
}

/// Geometry templates per geometry identifier.
pub type Templates<'doc, B> = HashMap<&'doc str, Vec<Geometry<B>>>;

pub fn load_scene<A: BufferAllocator>(
    document: &Document,
    allocator: &A,
    options: &LoadOptions,
) -> Result<LoadedScene<A::Buffer>, LoadError> {
    let registry = Registry::index(document, options)?;
    let scene = registry
        .root_visual_scene()
        .ok_or_else(|| LoadError::malformed("the document does not instance a visual scene"))?;
    let templates = geometry_templates(document, &registry, allocator);

    let mut root = Model::empty();
    root.transform = up_axis_correction(document.asset.up_axis, options.up_axis);
    for node in &scene.nodes {
        if let Some(child) = load_model(&registry, node, &templates)? {
            root.children.push(child);
        }
    }

    let diagnostics = registry.into_diagnostics();
    log::info!(
        "loaded scene with {} models, {} triangles ({} diagnostics)",
        root.node_count(),
        root.triangle_count(),
        diagnostics.len()
    );
    Ok(LoadedScene { root, diagnostics })
}

/**
 * Allocates buffers for every non-empty polylist of every built mesh, in
 * document order. Geometries without triangles get no entry.
 */
pub fn geometry_templates<'doc, A: BufferAllocator>(
    document: &'doc Document,
    registry: &Registry<'doc>,
    allocator: &A,
) -> Templates<'doc, A::Buffer> {
    let mut templates = HashMap::new();
    for geometry in &document.geometries {
        let Some(id) = geometry.id.as_deref() else {
            continue;
        };
        let Some(mesh) = registry.mesh(id) else {
            continue;
        };
        let geometries: Vec<_> = mesh
            .polylists
            .iter()
            .filter(|polylist| !polylist.is_empty())
            .map(|polylist| allocate_polylist(id, polylist, allocator))
            .collect();
        if geometries.is_empty() {
            log::debug!("geometry `{id}` has no triangles, nothing to allocate");
        } else {
            templates.insert(id, geometries);
        }
    }
    templates
}

fn allocate_polylist<A: BufferAllocator>(
    id: &str,
    polylist: &Polylist,
    allocator: &A,
) -> Geometry<A::Buffer> {
    let to_f32 = |data: &[f64]| data.iter().map(|&value| value as f32).collect::<Vec<_>>();
    let vertex_buffer =
        allocator.vertex_buffer(&format!("{id} positions"), &to_f32(&polylist.positions));
    let normal_buffer =
        allocator.vertex_buffer(&format!("{id} normals"), &to_f32(&polylist.normals));
    let elements = DrawElements {
        buffer: allocator.index_buffer(&format!("{id} triangles"), &polylist.triangles),
        primitive: Primitive::Triangles,
        count: polylist.triangles.len(),
    };
    Geometry {
        vertex_buffer,
        normal_buffer,
        elements: vec![elements],
    }
}

/**
 * Builds the model for `node` and its subtree.
 *
 * Returns `None` when the node has no geometry and every child was pruned.
 */
pub(crate) fn load_model<B: Clone>(
    registry: &Registry<'_>,
    node: &Node,
    templates: &Templates<'_, B>,
) -> Result<Option<Model<B>>, LoadError> {
    let transform = node
        .id
        .as_deref()
        .and_then(|id| registry.transform(id))
        .copied()
        .ok_or_else(|| LoadError::MissingTransform(node.label()))?;

    let mut geometry = Vec::new();
    for instance in &node.instance_geometry {
        match registry.resolve_url(&instance.url)? {
            Object::Geometry(target) => {
                if let Some(found) = target.id.as_deref().and_then(|id| templates.get(id)) {
                    geometry.extend(found.iter().cloned());
                }
            }
            other => {
                return Err(LoadError::malformed(format!(
                    "geometry instance {} on node {} refers to a {}",
                    instance.url.0,
                    node.label(),
                    other.kind()
                )));
            }
        }
    }

    let mut children = Vec::new();
    for child in &node.children {
        if let Some(model) = load_model(registry, child, templates)? {
            children.push(model);
        }
    }

    let model = Model::new(transform, geometry, children);
    Ok((!model.is_empty()).then_some(model))
}
