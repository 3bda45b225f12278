//! The parsed scene document consumed by the loader.
//!
//! The types mirror the subset of COLLADA the pipeline reads: visual scenes
//! made of nodes, geometries made of float sources and polygon lists, and the
//! asset's up axis. Parsing the XML itself happens before this point.

use crate::data_structures::transform::TransformOp;

/// A reference to another element of the document.
///
/// Only fragment references (`#some-id`) point inside the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url(pub String);

impl Url {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Reference to the element with identifier `id`.
    pub fn fragment(id: &str) -> Self {
        Self(format!("#{id}"))
    }

    /// The referenced identifier, if this is a fragment reference.
    pub fn id(&self) -> Option<&str> {
        self.0.strip_prefix('#').filter(|id| !id.is_empty())
    }
}

impl From<&str> for Url {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// The world vertical axis declared by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

#[derive(Debug, Clone, Default)]
pub struct Asset {
    pub up_axis: UpAxis,
}

/// Input semantics. Anything the pipeline does not read is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Semantic {
    Vertex,
    Normal,
    Position,
    Other(String),
}

impl From<&str> for Semantic {
    fn from(semantic: &str) -> Self {
        match semantic {
            "VERTEX" => Semantic::Vertex,
            "NORMAL" => Semantic::Normal,
            "POSITION" => Semantic::Position,
            other => Semantic::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub asset: Asset,
    pub visual_scenes: Vec<VisualScene>,
    pub geometries: Vec<Geometry>,
    /// `instance_visual_scene` of the document's scene: the root to assemble.
    pub scene: Option<Url>,
}

#[derive(Debug, Clone, Default)]
pub struct VisualScene {
    pub id: Option<String>,
    pub name: Option<String>,
    pub nodes: Vec<Node>,
}

impl VisualScene {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceGeometry {
    pub url: Url,
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Transform operations in document order.
    pub transforms: Vec<TransformOp>,
    pub instance_geometry: Vec<InstanceGeometry>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// A node without an identifier.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, op: TransformOp) -> Self {
        self.transforms.push(op);
        self
    }

    pub fn with_geometry(mut self, geometry_id: &str) -> Self {
        self.instance_geometry.push(InstanceGeometry {
            url: Url::fragment(geometry_id),
        });
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Human readable label used in error messages.
    pub fn label(&self) -> String {
        match (&self.id, &self.name) {
            (Some(id), _) => format!("`{id}`"),
            (None, Some(name)) => format!("named `{name}` (no id)"),
            (None, None) => "<anonymous>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub id: Option<String>,
    pub name: Option<String>,
    /// `None` for geometry kinds the pipeline does not convert (splines, ...).
    pub mesh: Option<MeshElement>,
}

impl Geometry {
    pub fn new(id: &str, mesh: MeshElement) -> Self {
        Self {
            id: Some(id.to_string()),
            name: None,
            mesh: Some(mesh),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Source {
    pub id: String,
    pub float_array: Vec<f64>,
}

impl Source {
    pub fn new(id: &str, float_array: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            float_array,
        }
    }
}

/// A per-vertex input of the `<vertices>` element.
#[derive(Debug, Clone)]
pub struct UnsharedInput {
    pub semantic: Semantic,
    pub source: Url,
}

/// A per-corner input of a polygon list with its offset in the index record.
#[derive(Debug, Clone)]
pub struct SharedInput {
    pub semantic: Semantic,
    pub offset: usize,
    pub source: Url,
}

impl SharedInput {
    pub fn new(semantic: &str, offset: usize, source: &str) -> Self {
        Self {
            semantic: semantic.into(),
            offset,
            source: Url::fragment(source),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vertices {
    pub id: String,
    pub inputs: Vec<UnsharedInput>,
}

impl Vertices {
    /// A vertices element whose `POSITION` input reads from `positions`.
    pub fn positions(id: &str, positions: &str) -> Self {
        Self {
            id: id.to_string(),
            inputs: vec![UnsharedInput {
                semantic: Semantic::Position,
                source: Url::fragment(positions),
            }],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolylistElement {
    pub material: Option<String>,
    pub inputs: Vec<SharedInput>,
    /// Corner count of each polygon.
    pub vcount: Vec<usize>,
    /// Interleaved corner index records, one record of `inputs.len()` indices per corner.
    pub p: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct MeshElement {
    pub sources: Vec<Source>,
    pub vertices: Vertices,
    pub polylists: Vec<PolylistElement>,
}
