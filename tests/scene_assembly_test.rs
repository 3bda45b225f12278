mod common;

use std::thread;

use cgmath::{InnerSpace, SquareMatrix, Vector4};
use common::test_utils::{
    corners, document, document_up, geometry_with, init_logging, polylist, triangle,
};
use dae_scene::{
    Diagnostic, LoadError, LoadOptions, LoadedScene, Matrix4, UpAxis, Vector3,
    data_structures::{
        document::{Document, Geometry, Node},
        transform::TransformOp,
    },
    load_scene,
    resources::{
        registry::{Object, Registry},
        upload::{HostBuffer, HostBuffers},
    },
};

fn load(document: &Document) -> Result<LoadedScene<HostBuffer>, LoadError> {
    load_scene(document, &HostBuffers, &LoadOptions::default())
}

#[test]
fn should_prune_branches_without_geometry() -> anyhow::Result<()> {
    init_logging();
    let drawn = Node::new("drawn").with_geometry("tri");
    let empty_branch = Node::new("empty").with_child(Node::new("leaf"));
    let document = document(vec![drawn, empty_branch], vec![triangle("tri")]);

    let loaded = load(&document)?;

    assert_eq!(loaded.root.children.len(), 1);
    assert_eq!(loaded.root.children[0].geometry.len(), 1);
    assert_eq!(loaded.root.node_count(), 2);
    assert_eq!(loaded.root.triangle_count(), 1);
    Ok(())
}

#[test]
fn should_keep_empty_parents_of_drawing_children() -> anyhow::Result<()> {
    let parent = Node::new("parent")
        .with_transform(TransformOp::translate(0.0, 1.0, 0.0))
        .with_child(Node::new("pruned"))
        .with_child(Node::new("child").with_geometry("tri"));
    let document = document(vec![parent], vec![triangle("tri")]);

    let root = load(&document)?.root;

    let parent = &root.children[0];
    assert!(parent.geometry.is_empty());
    assert_eq!(parent.children.len(), 1);
    assert_eq!(parent.transform, Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0)));
    Ok(())
}

#[test]
fn should_prune_nodes_instancing_only_skipped_polygons() -> anyhow::Result<()> {
    let pentagon = corners(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    let geometry = geometry_with("pentagon", 5, 1, vec![polylist("pentagon", vec![5], pentagon)]);
    let document = document(vec![Node::new("a").with_geometry("pentagon")], vec![geometry]);

    let loaded = load(&document)?;

    assert!(loaded.root.children.is_empty());
    assert!(matches!(
        loaded.diagnostics.as_slice(),
        [Diagnostic::UnsupportedPolygonSize(polygon)] if polygon.geometry == "pentagon"
    ));
    Ok(())
}

#[test]
fn should_always_return_a_root() -> anyhow::Result<()> {
    let loaded = load(&document(Vec::new(), Vec::new()))?;

    assert!(loaded.root.is_empty());
    assert_eq!(loaded.root.transform, Matrix4::identity());
    assert!(loaded.diagnostics.is_empty());
    Ok(())
}

#[test]
fn should_rotate_z_up_documents_onto_y_up() -> anyhow::Result<()> {
    let document = document_up(
        UpAxis::Z,
        vec![Node::new("a").with_geometry("tri")],
        vec![triangle("tri")],
    );

    let root = load(&document)?.root;

    let up = root.transform * Vector4::unit_z();
    assert!((up - Vector4::unit_y()).magnitude() < 1e-9, "{up:?}");
    // Only the root carries the correction.
    assert_eq!(root.children[0].transform, Matrix4::identity());
    Ok(())
}

#[test]
fn should_honour_configured_up_axis() -> anyhow::Result<()> {
    let options = LoadOptions {
        up_axis: UpAxis::Z,
        ..Default::default()
    };
    let document = document_up(UpAxis::Z, Vec::new(), Vec::new());

    let loaded = load_scene(&document, &HostBuffers, &options)?;

    assert_eq!(loaded.root.transform, Matrix4::identity());
    Ok(())
}

#[test]
fn should_share_geometry_templates_between_instances() -> anyhow::Result<()> {
    let nodes = vec![
        Node::new("left").with_geometry("tri"),
        Node::new("right").with_geometry("tri"),
    ];
    let root = load(&document(nodes, vec![triangle("tri")]))?.root;

    let left = &root.children[0].geometry[0];
    let right = &root.children[1].geometry[0];
    assert!(left.vertex_buffer.shares_storage(&right.vertex_buffer));
    assert!(left.normal_buffer.shares_storage(&right.normal_buffer));
    assert!(left.elements[0].buffer.shares_storage(&right.elements[0].buffer));
    Ok(())
}

#[test]
fn should_hand_welded_data_to_the_allocator() -> anyhow::Result<()> {
    let document = document(vec![Node::new("a").with_geometry("tri")], vec![triangle("tri")]);
    let root = load(&document)?.root;

    let geometry = &root.children[0].geometry[0];
    assert_eq!(
        geometry.vertex_buffer.as_vertices(),
        Some([0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 4.0, 6.0].as_slice())
    );
    assert_eq!(geometry.elements[0].buffer.as_indices(), Some([0, 1, 2].as_slice()));
    assert_eq!(geometry.elements[0].count, 3);
    Ok(())
}

#[test]
fn should_add_one_geometry_per_non_empty_polylist() -> anyhow::Result<()> {
    let polylists = vec![
        polylist("g", vec![3], corners(&[(0, 0), (1, 0), (2, 0)])),
        polylist("g", vec![2], corners(&[(0, 0), (1, 0)])),
        polylist("g", vec![4], corners(&[(0, 0), (1, 0), (2, 0), (3, 0)])),
    ];
    let geometry = geometry_with("g", 4, 1, polylists);
    let root = load(&document(vec![Node::new("a").with_geometry("g")], vec![geometry]))?.root;

    let model = &root.children[0];
    assert_eq!(model.geometry.len(), 2);
    assert_eq!(model.geometry[1].triangle_count(), 2);
    Ok(())
}

#[test]
fn should_register_geometry_without_mesh_but_draw_nothing() -> anyhow::Result<()> {
    let spline = Geometry {
        id: Some("spline".to_string()),
        ..Default::default()
    };
    let nodes = vec![
        Node::new("curve").with_geometry("spline"),
        Node::new("drawn").with_geometry("tri"),
    ];
    let document = document(nodes, vec![spline, triangle("tri")]);

    let registry = Registry::index(&document, &LoadOptions::default())?;
    assert!(matches!(registry.resolve("spline")?, Object::Geometry(_)));
    assert!(registry.mesh("spline").is_none());

    let loaded = load(&document)?;
    assert_eq!(loaded.root.children.len(), 1);
    assert_eq!(loaded.root.triangle_count(), 1);
    assert!(loaded.diagnostics.is_empty());
    Ok(())
}

#[test]
fn should_require_identified_nodes() {
    let document = document(vec![Node::anonymous().with_geometry("tri")], vec![triangle("tri")]);

    assert!(matches!(load(&document), Err(LoadError::MissingTransform(_))));
}

#[test]
fn should_fail_on_unresolved_geometry_instance() {
    let document = document(vec![Node::new("a").with_geometry("ghost")], Vec::new());

    assert!(matches!(
        load(&document),
        Err(LoadError::UnresolvedIdentifier(id)) if id == "ghost"
    ));
}

#[test]
fn should_fail_on_geometry_instance_of_a_node() {
    let document = document(vec![Node::new("a").with_geometry("b"), Node::new("b")], Vec::new());

    assert!(matches!(load(&document), Err(LoadError::MalformedDocument(_))));
}

#[test]
fn should_fail_without_root_scene() {
    let mut document = document(Vec::new(), Vec::new());
    document.scene = None;

    assert!(matches!(load(&document), Err(LoadError::MalformedDocument(_))));
}

#[test]
fn should_draw_with_accumulated_world_matrices() -> anyhow::Result<()> {
    let parent = Node::new("parent")
        .with_transform(TransformOp::translate(1.0, 0.0, 0.0))
        .with_child(
            Node::new("child")
                .with_transform(TransformOp::translate(0.0, 2.0, 0.0))
                .with_geometry("tri"),
        );
    let root = load(&document(vec![parent], vec![triangle("tri")]))?.root;

    let draws = root.draw_list();

    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].world, Matrix4::from_translation(Vector3::new(1.0, 2.0, 0.0)));
    assert_eq!(draws[0].world_raw()[3], [1.0, 2.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn should_load_the_same_document_concurrently() -> anyhow::Result<()> {
    let nodes = (0..4)
        .map(|i| Node::new(&format!("n{i}")).with_geometry("tri"))
        .collect();
    let document = document(nodes, vec![triangle("tri")]);

    let document = &document;

    let counts = thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(move || load(document))).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow::anyhow!("load thread panicked")))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    for loaded in counts {
        assert_eq!(loaded?.root.triangle_count(), 4);
    }
    Ok(())
}
