//! Scene data: the parsed input document and everything derived from it.
//!
//! - `document` is the parsed scene document handed to the loader
//! - `transform` composes node transform operations into matrices
//! - `mesh` holds the welded, triangulated meshes built per geometry
//! - `model` is the output scene tree handed to the renderer

pub mod document;
pub mod mesh;
pub mod model;
pub mod transform;
