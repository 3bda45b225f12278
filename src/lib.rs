//! dae-scene
//!
//! Converts a parsed, COLLADA-style scene document into a renderer-ready
//! scene graph: a tree of transform nodes, each owning welded, triangle-only
//! position/normal buffers. The crate neither parses XML nor draws anything;
//! it resolves the document's cross references, composes node transforms,
//! decodes polygon lists into indexed triangles and hands buffer creation to
//! a caller-supplied allocator.
//!
//! High-level modules
//! - `data_structures`: the input document, meshes, transforms and the output model tree
//! - `resources`: the load pipeline (identifier registry, mesh builder, scene assembly)
//! - `render`: world-matrix traversal of the output tree for draw submission
//! - `options` / `error`: load configuration, fatal errors and diagnostics
//!
//! ```
//! use dae_scene::{
//!     data_structures::document::*,
//!     resources::{load_scene, upload::HostBuffers},
//!     LoadOptions,
//! };
//!
//! let document = Document {
//!     visual_scenes: vec![VisualScene::new("scene").with_node(Node::new("empty"))],
//!     scene: Some(Url::fragment("scene")),
//!     ..Default::default()
//! };
//! let loaded = load_scene(&document, &HostBuffers, &LoadOptions::default()).unwrap();
//! // `empty` draws nothing and is pruned; the root always remains.
//! assert!(loaded.root.children.is_empty());
//! ```

pub mod data_structures;
pub mod error;
pub mod options;
pub mod render;
pub mod resources;

pub use cgmath::{Matrix4, Vector3};
pub use data_structures::document::UpAxis;
pub use error::{Diagnostic, LoadError};
pub use options::{LoadOptions, PolygonPolicy};
pub use resources::{LoadedScene, load_scene};
