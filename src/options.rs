//! Load configuration.

use crate::data_structures::document::UpAxis;

/// What the mesh builder does with polygons that are neither triangles nor quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonPolicy {
    /// Leave the polygon out, log a warning and record a diagnostic.
    #[default]
    Skip,
    /// Abort the load with
    /// [`LoadError::UnsupportedPolygon`](crate::error::LoadError::UnsupportedPolygon).
    Reject,
}

/// Options for [`load_scene`](crate::resources::load_scene).
///
/// ```
/// use dae_scene::{LoadOptions, PolygonPolicy};
///
/// let options = LoadOptions {
///     unsupported_polygons: PolygonPolicy::Reject,
///     ..Default::default()
/// };
/// assert_eq!(options.up_axis, dae_scene::UpAxis::Y);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub unsupported_polygons: PolygonPolicy,
    /// The vertical axis the renderer expects. Documents declaring a different
    /// up axis get a corrective rotation on the root model.
    pub up_axis: UpAxis,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            unsupported_polygons: PolygonPolicy::Skip,
            up_axis: UpAxis::Y,
        }
    }
}
