//! The renderer-ready scene tree.
//!
//! `B` is the buffer handle type of the
//! [`BufferAllocator`](crate::resources::upload::BufferAllocator) that
//! received the geometry data. Handles of a shared geometry template are
//! cloned into every model instancing it, so each template is allocated once.

use cgmath::{Matrix4, SquareMatrix};

/// Primitive topology of a draw-element group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

/// One indexed draw: `count` indices read from `buffer`.
#[derive(Debug, Clone)]
pub struct DrawElements<B> {
    pub buffer: B,
    pub primitive: Primitive,
    pub count: usize,
}

/// Drawable content: position and normal buffers plus the index groups drawing them.
#[derive(Debug, Clone)]
pub struct Geometry<B> {
    pub vertex_buffer: B,
    pub normal_buffer: B,
    pub elements: Vec<DrawElements<B>>,
}

impl<B> Geometry<B> {
    pub fn triangle_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|elements| elements.primitive == Primitive::Triangles)
            .map(|elements| elements.count / 3)
            .sum()
    }
}

/// A node of the output tree. Its transform is relative to its parent.
#[derive(Debug, Clone)]
pub struct Model<B> {
    pub transform: Matrix4<f64>,
    pub geometry: Vec<Geometry<B>>,
    pub children: Vec<Model<B>>,
}

impl<B> Model<B> {
    pub fn new(
        transform: Matrix4<f64>,
        geometry: Vec<Geometry<B>>,
        children: Vec<Model<B>>,
    ) -> Self {
        Self {
            transform,
            geometry,
            children,
        }
    }

    /// An identity-transformed model without content.
    pub fn empty() -> Self {
        Self::new(Matrix4::identity(), Vec::new(), Vec::new())
    }

    /// `true` if neither this model nor any child draws anything.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty() && self.children.is_empty()
    }

    /// Number of models in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Model::node_count).sum::<usize>()
    }

    pub fn triangle_count(&self) -> usize {
        self.geometry.iter().map(Geometry::triangle_count).sum::<usize>()
            + self.children.iter().map(Model::triangle_count).sum::<usize>()
    }
}
