//! Error and diagnostic types produced while loading a scene document.
//!
//! Fatal conditions abort the whole load and surface as a single
//! [`LoadError`]. Non-fatal conditions are collected as [`Diagnostic`]s and
//! returned next to the finished scene.

use std::fmt;

/// A polygon whose corner count the mesh builder cannot triangulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPolygon {
    pub geometry: String,
    /// Position of the polygon list inside its geometry.
    pub polylist: usize,
    /// Position of the polygon inside its polygon list.
    pub polygon: usize,
    pub corners: usize,
}

impl fmt::Display for UnsupportedPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported polygon size {} (geometry `{}`, polylist {}, polygon {})",
            self.corners, self.geometry, self.polylist, self.polygon
        )
    }
}

/// Fatal load failures. No partial scene is returned when one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("identifier `{0}` is already bound to a different object")]
    DuplicateIdentifier(String),
    #[error("identifier `{0}` cannot be resolved")]
    UnresolvedIdentifier(String),
    #[error("no transform was indexed for node {0}")]
    MissingTransform(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("{0}")]
    UnsupportedPolygon(UnsupportedPolygon),
    #[error(
        "polylist {polylist} of geometry `{geometry}` needs more than {limit} distinct vertices"
    )]
    IndexOverflow {
        geometry: String,
        polylist: usize,
        limit: usize,
    },
}

impl LoadError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }
}

/// Non-fatal findings recorded during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The polygon was left out of the output; the rest of its list was kept.
    UnsupportedPolygonSize(UnsupportedPolygon),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedPolygonSize(polygon) => write!(f, "skipped {polygon}"),
        }
    }
}
