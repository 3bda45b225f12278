//! Loads a small Z-up scene built in code and prints what a renderer would draw.
//!
//! Run with `RUST_LOG=debug cargo run --example cube_scene` to see the loader's logging.

use dae_scene::{
    LoadOptions, load_scene,
    data_structures::{
        document::{
            Asset, Document, Geometry, MeshElement, Node, PolylistElement, SharedInput, Source,
            UpAxis, Url, Vertices, VisualScene,
        },
        transform::TransformOp,
    },
    resources::upload::HostBuffers,
};

const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Faces as counter-clockwise corner quads, paired with their face normal index.
const FACES: [([usize; 4], usize); 6] = [
    ([0, 3, 2, 1], 0),
    ([4, 5, 6, 7], 1),
    ([0, 1, 5, 4], 2),
    ([2, 3, 7, 6], 3),
    ([1, 2, 6, 5], 4),
    ([0, 4, 7, 3], 5),
];

const NORMALS: [[f64; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

fn cube() -> Geometry {
    let p = FACES
        .iter()
        .flat_map(|(corners, normal)| corners.iter().flat_map(move |&corner| [corner, *normal]))
        .collect();
    Geometry::new(
        "cube",
        MeshElement {
            sources: vec![
                Source::new("cube-positions", CORNERS.concat()),
                Source::new("cube-normals", NORMALS.concat()),
            ],
            vertices: Vertices::positions("cube-vertices", "cube-positions"),
            polylists: vec![PolylistElement {
                material: Some("grey".to_string()),
                inputs: vec![
                    SharedInput::new("VERTEX", 0, "cube-vertices"),
                    SharedInput::new("NORMAL", 1, "cube-normals"),
                ],
                vcount: vec![4; FACES.len()],
                p,
            }],
        },
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let stack = Node::new("stack")
        .with_child(Node::new("bottom").with_geometry("cube"))
        .with_child(
            Node::new("top")
                .with_transform(TransformOp::translate(0.0, 0.0, 2.0))
                .with_transform(TransformOp::rotate(0.0, 0.0, 1.0, 45.0))
                .with_geometry("cube"),
        );
    // Lights and cameras carry no geometry and disappear from the output.
    let camera = Node::new("camera").with_child(Node::new("camera-target"));

    let document = Document {
        asset: Asset { up_axis: UpAxis::Z },
        visual_scenes: vec![VisualScene::new("scene").with_node(stack).with_node(camera)],
        geometries: vec![cube()],
        scene: Some(Url::fragment("scene")),
    };

    let loaded = load_scene(&document, &HostBuffers, &LoadOptions::default())?;
    for diagnostic in &loaded.diagnostics {
        log::warn!("{diagnostic}");
    }

    println!(
        "{} models, {} triangles",
        loaded.root.node_count(),
        loaded.root.triangle_count()
    );
    for (i, item) in loaded.root.draw_list().iter().enumerate() {
        let origin = item.world_raw()[3];
        println!(
            "draw {i}: {} triangles at ({:.2}, {:.2}, {:.2})",
            item.geometry.triangle_count(),
            origin[0],
            origin[1],
            origin[2]
        );
    }
    Ok(())
}
