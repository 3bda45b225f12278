//! Traversal helpers for the renderer.
//!
//! Each [`Model`] stores its transform relative to its parent. Drawing needs
//! world matrices, obtained by multiplying transforms top-down from the root.
//! The helpers here do that accumulation and flatten the tree into the list
//! of draws a frame has to submit.

use cgmath::{Matrix4, SquareMatrix};

use crate::data_structures::model::{Geometry, Model};

/// One geometry to draw with its accumulated world matrix.
#[derive(Debug)]
pub struct DrawItem<'a, B> {
    pub world: Matrix4<f64>,
    pub geometry: &'a Geometry<B>,
}

impl<B> DrawItem<'_, B> {
    /// World matrix in the column-major `f32` layout shader uniforms expect.
    pub fn world_raw(&self) -> [[f32; 4]; 4] {
        to_raw(&self.world)
    }
}

pub fn to_raw(matrix: &Matrix4<f64>) -> [[f32; 4]; 4] {
    let columns: [[f64; 4]; 4] = (*matrix).into();
    columns.map(|column| column.map(|value| value as f32))
}

impl<B> Model<B> {
    /// Calls `visit` for every model of the tree, parents before children,
    /// with the model's world matrix.
    pub fn visit<'a>(
        &'a self,
        parent: Matrix4<f64>,
        visit: &mut impl FnMut(&Matrix4<f64>, &'a Model<B>),
    ) {
        let world = parent * self.transform;
        visit(&world, self);
        for child in &self.children {
            child.visit(world, visit);
        }
    }

    /// World matrices of all models in visiting order.
    pub fn world_transforms(&self) -> Vec<Matrix4<f64>> {
        let mut transforms = Vec::with_capacity(self.node_count());
        self.visit(Matrix4::identity(), &mut |world, _| transforms.push(*world));
        transforms
    }

    /// Every geometry of the tree paired with the world matrix it is drawn with.
    pub fn draw_list(&self) -> Vec<DrawItem<'_, B>> {
        let mut items = Vec::new();
        self.visit(Matrix4::identity(), &mut |world, model| {
            items.extend(model.geometry.iter().map(|geometry| DrawItem {
                world: *world,
                geometry,
            }));
        });
        items
    }
}
