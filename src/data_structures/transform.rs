//! Node transform composition.
//!
//! A node carries an arbitrary, possibly repeated sequence of primitive
//! transforms. They are folded into one affine matrix by right-multiplying
//! each operation onto the accumulator in document order, so the last listed
//! operation is the first one applied to a point.

use cgmath::{Deg, InnerSpace, Matrix, Matrix4, SquareMatrix, Vector3};

use crate::data_structures::document::UpAxis;

/// One node-local transform operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vector3<f64>),
    /// Rotation about `axis` by `angle` degrees.
    Rotate { axis: Vector3<f64>, angle: f64 },
    /// Non-uniform scale.
    Scale(Vector3<f64>),
    /// A full matrix, as written by `<matrix>` elements.
    Matrix(Matrix4<f64>),
}

impl TransformOp {
    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        Self::Translate(Vector3::new(x, y, z))
    }

    pub fn rotate(x: f64, y: f64, z: f64, angle: f64) -> Self {
        Self::Rotate {
            axis: Vector3::new(x, y, z),
            angle,
        }
    }

    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Self::Scale(Vector3::new(x, y, z))
    }

    pub fn matrix(&self) -> Matrix4<f64> {
        match *self {
            TransformOp::Translate(offset) => Matrix4::from_translation(offset),
            TransformOp::Rotate { axis, angle } => {
                if axis.magnitude2() == 0.0 {
                    log::warn!("rotation of {angle} degrees about a zero axis is ignored");
                    return Matrix4::identity();
                }
                Matrix4::from_axis_angle(axis.normalize(), Deg(angle))
            }
            TransformOp::Scale(factors) => {
                Matrix4::from_nonuniform_scale(factors.x, factors.y, factors.z)
            }
            TransformOp::Matrix(matrix) => matrix,
        }
    }
}

/// Folds `ops` into a single matrix. No operations yield the identity.
pub fn compose(ops: &[TransformOp]) -> Matrix4<f64> {
    ops.iter()
        .fold(Matrix4::identity(), |transform, op| transform * op.matrix())
}

/// Rotation taking `axis` up to Y up.
fn to_y_up(axis: UpAxis) -> Matrix4<f64> {
    match axis {
        UpAxis::X => Matrix4::from_angle_z(Deg(90.0)),
        UpAxis::Y => Matrix4::identity(),
        UpAxis::Z => Matrix4::from_angle_x(Deg(-90.0)) * Matrix4::from_angle_z(Deg(90.0)),
    }
}

/// Root correction re-orienting a document declared `declared` up so it
/// displays upright for a renderer expecting `expected` up.
pub fn up_axis_correction(declared: UpAxis, expected: UpAxis) -> Matrix4<f64> {
    if declared == expected {
        return Matrix4::identity();
    }
    // Pure rotations: the transpose is the inverse.
    to_y_up(expected).transpose() * to_y_up(declared)
}
