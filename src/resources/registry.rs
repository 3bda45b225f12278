//! Identifier registry for one loaded document.
//!
//! Document elements reference each other by string identifier. The registry
//! keeps an arena of every identified object together with the data derived
//! from it (raw float arrays, built meshes, composed node transforms), so that
//! later passes resolve references through handles instead of chasing links
//! through the document tree.
//!
//! Identifiers are immutable once bound: binding an id again to the same
//! object is a no-op, binding it to anything else fails the load.

use std::collections::HashMap;

use cgmath::Matrix4;

use crate::{
    data_structures::{
        document::{Document, Geometry, Node, Url, VisualScene},
        mesh::Mesh,
        transform::compose,
    },
    error::{Diagnostic, LoadError},
    options::LoadOptions,
    resources::mesh::build_mesh,
};

/// An identified document element.
#[derive(Debug, Clone, Copy)]
pub enum Object<'doc> {
    VisualScene(&'doc VisualScene),
    Node(&'doc Node),
    Geometry(&'doc Geometry),
}

impl Object<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Object::VisualScene(_) => "visual scene",
            Object::Node(_) => "node",
            Object::Geometry(_) => "geometry",
        }
    }
}

/// Objects compare by identity, not by content.
impl PartialEq for Object<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::VisualScene(a), Object::VisualScene(b)) => std::ptr::eq(*a, *b),
            (Object::Node(a), Object::Node(b)) => std::ptr::eq(*a, *b),
            (Object::Geometry(a), Object::Geometry(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

/// Stable index of an object in the registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

#[derive(Debug, Default)]
pub struct Registry<'doc> {
    objects: Vec<Object<'doc>>,
    ids: HashMap<String, ObjectHandle>,
    data: HashMap<String, &'doc [f64]>,
    meshes: HashMap<String, Mesh>,
    transforms: HashMap<String, Matrix4<f64>>,
    root: Option<&'doc VisualScene>,
    diagnostics: Vec<Diagnostic>,
}

impl<'doc> Registry<'doc> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `document`: one pass over the visual scenes registering nodes
    /// and caching their transforms, one pass over the geometries registering
    /// them and building their meshes.
    pub fn index(document: &'doc Document, options: &LoadOptions) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        registry.index_visual_scenes(document)?;
        registry.index_geometries(document, options)?;

        if let Some(url) = &document.scene {
            registry.root = match registry.resolve_url(url)? {
                Object::VisualScene(scene) => Some(scene),
                other => {
                    return Err(LoadError::malformed(format!(
                        "scene instance {} refers to a {}, not a visual scene",
                        url.0,
                        other.kind()
                    )));
                }
            };
        }
        log::debug!(
            "indexed {} identifiers, {} transforms, {} meshes",
            registry.ids.len(),
            registry.transforms.len(),
            registry.meshes.len()
        );
        Ok(registry)
    }

    fn index_visual_scenes(&mut self, document: &'doc Document) -> Result<(), LoadError> {
        for scene in &document.visual_scenes {
            if let Some(id) = &scene.id {
                self.bind(id, Object::VisualScene(scene))?;
            }
            for node in &scene.nodes {
                self.index_node(node)?;
            }
        }
        Ok(())
    }

    fn index_node(&mut self, node: &'doc Node) -> Result<(), LoadError> {
        if let Some(id) = &node.id {
            self.bind(id, Object::Node(node))?;
            self.transforms.insert(id.clone(), compose(&node.transforms));
        }
        for child in &node.children {
            self.index_node(child)?;
        }
        Ok(())
    }

    fn index_geometries(
        &mut self,
        document: &'doc Document,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        for geometry in &document.geometries {
            let Some(id) = &geometry.id else {
                log::debug!("skipping geometry without identifier");
                continue;
            };
            self.bind(id, Object::Geometry(geometry))?;
            match &geometry.mesh {
                Some(element) => {
                    let mesh = build_mesh(id, element, self, options)?;
                    log::debug!(
                        "geometry `{}`: {} polylists, {} triangles",
                        id,
                        mesh.polylists.len(),
                        mesh.triangle_count()
                    );
                    self.meshes.insert(id.clone(), mesh);
                }
                None => log::debug!("geometry `{id}` has no mesh"),
            }
        }
        Ok(())
    }

    /// Registers `object` under `id`.
    pub fn bind(&mut self, id: &str, object: Object<'doc>) -> Result<ObjectHandle, LoadError> {
        if let Some(&handle) = self.ids.get(id) {
            return if self.objects[handle.0] == object {
                Ok(handle)
            } else {
                Err(LoadError::DuplicateIdentifier(id.to_string()))
            };
        }
        let handle = ObjectHandle(self.objects.len());
        self.objects.push(object);
        self.ids.insert(id.to_string(), handle);
        Ok(handle)
    }

    pub fn handle(&self, id: &str) -> Option<ObjectHandle> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<Object<'doc>> {
        self.objects.get(handle.0).copied()
    }

    pub fn resolve(&self, id: &str) -> Result<Object<'doc>, LoadError> {
        self.handle(id)
            .and_then(|handle| self.get(handle))
            .ok_or_else(|| LoadError::UnresolvedIdentifier(id.to_string()))
    }

    pub fn resolve_url(&self, url: &Url) -> Result<Object<'doc>, LoadError> {
        match url.id() {
            Some(id) => self.resolve(id),
            None => Err(LoadError::UnresolvedIdentifier(url.0.clone())),
        }
    }

    /// Registers a raw float array. Same rebinding rules as [`Registry::bind`].
    pub fn bind_data(&mut self, id: &str, data: &'doc [f64]) -> Result<(), LoadError> {
        match self.data.get(id) {
            Some(bound) if std::ptr::eq(*bound, data) => Ok(()),
            Some(_) => Err(LoadError::DuplicateIdentifier(id.to_string())),
            None => {
                self.data.insert(id.to_string(), data);
                Ok(())
            }
        }
    }

    pub fn data(&self, id: &str) -> Result<&'doc [f64], LoadError> {
        self.data
            .get(id)
            .copied()
            .ok_or_else(|| LoadError::UnresolvedIdentifier(id.to_string()))
    }

    pub fn transform(&self, node_id: &str) -> Option<&Matrix4<f64>> {
        self.transforms.get(node_id)
    }

    pub fn mesh(&self, geometry_id: &str) -> Option<&Mesh> {
        self.meshes.get(geometry_id)
    }

    /// The visual scene designated by the document's scene instance, if any.
    pub fn root_visual_scene(&self) -> Option<&'doc VisualScene> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
