use std::collections::HashMap;

use crate::{
    data_structures::{
        document::{MeshElement, PolylistElement, Semantic, SharedInput},
        mesh::{DIMENSIONS, Mesh, Polylist},
    },
    error::{Diagnostic, LoadError, UnsupportedPolygon},
    options::{LoadOptions, PolygonPolicy},
    resources::registry::Registry,
};

/// Largest number of distinct vertices a polylist may address with 16-bit indices.
pub const MAX_VERTICES: usize = i16::MAX as usize + 1;

/**
 * Builds the mesh of one geometry: registers its float sources, then decodes
 * every polygon list into a welded, triangle-only [`Polylist`].
 */
pub fn build_mesh<'doc>(
    geometry: &str,
    element: &'doc MeshElement,
    registry: &mut Registry<'doc>,
    options: &LoadOptions,
) -> Result<Mesh, LoadError> {
    for source in &element.sources {
        registry.bind_data(&source.id, &source.float_array)?;
    }

    let mut vertex_semantics = HashMap::new();
    for input in &element.vertices.inputs {
        vertex_semantics.insert(&input.semantic, &input.source);
    }
    let positions = vertex_semantics.get(&Semantic::Position).ok_or_else(|| {
        LoadError::malformed(format!(
            "vertices `{}` of geometry `{geometry}` have no POSITION input",
            element.vertices.id
        ))
    })?;
    let positions = match positions.id() {
        Some(id) => registry.data(id)?,
        None => return Err(LoadError::UnresolvedIdentifier(positions.0.clone())),
    };

    let mut polylists = Vec::with_capacity(element.polylists.len());
    for (index, polylist) in element.polylists.iter().enumerate() {
        let layout = StreamLayout::read(geometry, &polylist.inputs, positions, registry)?;
        let mut diagnostics = Vec::new();
        let decoded =
            build_polylist(geometry, index, polylist, &layout, options, &mut diagnostics)?;
        for diagnostic in diagnostics {
            registry.report(diagnostic);
        }
        polylists.push(decoded);
    }

    Ok(Mesh {
        vertices_id: element.vertices.id.clone(),
        polylists,
    })
}

/// Where each attribute lives inside an interleaved corner record.
#[derive(Debug, Clone, Copy)]
pub struct StreamLayout<'a> {
    pub vertex_offset: usize,
    pub positions: &'a [f64],
    pub normal_offset: usize,
    pub normals: &'a [f64],
    /// Indices per corner record.
    pub stride: usize,
}

impl<'a> StreamLayout<'a> {
    /// Reads the offsets of the `VERTEX` and `NORMAL` inputs and resolves the
    /// normal source. Inputs with other semantics only contribute to the stride.
    fn read(
        geometry: &str,
        inputs: &[SharedInput],
        positions: &'a [f64],
        registry: &Registry<'a>,
    ) -> Result<Self, LoadError> {
        let mut vertex_offset = None;
        let mut normal = None;
        for input in inputs {
            match input.semantic {
                Semantic::Vertex => vertex_offset = Some(input.offset),
                Semantic::Normal => {
                    let data = match input.source.id() {
                        Some(id) => registry.data(id)?,
                        None => return Err(LoadError::UnresolvedIdentifier(input.source.0.clone())),
                    };
                    normal = Some((input.offset, data));
                }
                _ => {}
            }
        }
        let missing = |semantic: &str| {
            LoadError::malformed(format!(
                "a polylist of geometry `{geometry}` has no {semantic} input"
            ))
        };
        let vertex_offset = vertex_offset.ok_or_else(|| missing("VERTEX"))?;
        let (normal_offset, normals) = normal.ok_or_else(|| missing("NORMAL"))?;
        Ok(Self {
            vertex_offset,
            positions,
            normal_offset,
            normals,
            stride: inputs.len(),
        })
    }
}

/// Accumulates output vertices, welding corners that share a
/// (position index, normal index) pair.
struct Welder<'a> {
    geometry: &'a str,
    polylist: usize,
    layout: &'a StreamLayout<'a>,
    used: HashMap<(usize, usize), i16>,
    output: Polylist,
}

impl<'a> Welder<'a> {
    fn vertex(&mut self, position: usize, normal: usize) -> Result<i16, LoadError> {
        if let Some(&index) = self.used.get(&(position, normal)) {
            return Ok(index);
        }
        if self.used.len() >= MAX_VERTICES {
            return Err(LoadError::IndexOverflow {
                geometry: self.geometry.to_string(),
                polylist: self.polylist,
                limit: MAX_VERTICES,
            });
        }
        let position_data = triple(self.layout.positions, position, "position", self.geometry)?;
        let normal_data = triple(self.layout.normals, normal, "normal", self.geometry)?;
        // Bounded by MAX_VERTICES above.
        let index = self.used.len() as i16;
        self.output.positions.extend_from_slice(position_data);
        self.output.normals.extend_from_slice(normal_data);
        self.used.insert((position, normal), index);
        Ok(index)
    }
}

fn triple<'d>(
    data: &'d [f64],
    index: usize,
    what: &str,
    geometry: &str,
) -> Result<&'d [f64], LoadError> {
    let range = index
        .checked_mul(DIMENSIONS)
        .and_then(|start| Some(start..start.checked_add(DIMENSIONS)?));
    range.and_then(|range| data.get(range)).ok_or_else(|| {
        LoadError::malformed(format!(
            "{what} index {index} is past the end of a {}-value source in `{geometry}`",
            data.len()
        ))
    })
}

/**
 * Decodes one polygon list into triangles.
 *
 * Triangles are emitted as they are, quads are split into (0, 1, 2) and
 * (0, 2, 3). Other corner counts are handled according to
 * `options.unsupported_polygons`; a skipped polygon still consumes its corner
 * records so the following polygons stay aligned with the index stream.
 */
pub fn build_polylist(
    geometry: &str,
    index: usize,
    element: &PolylistElement,
    layout: &StreamLayout<'_>,
    options: &LoadOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Polylist, LoadError> {
    let mut welder = Welder {
        geometry,
        polylist: index,
        layout,
        used: HashMap::new(),
        output: Polylist::default(),
    };
    let stride = layout.stride;
    let mut record: usize = 0;

    for (polygon, &corners) in element.vcount.iter().enumerate() {
        let start = record;
        record = corners
            .checked_mul(stride)
            .and_then(|len| record.checked_add(len))
            .ok_or_else(|| {
                LoadError::malformed(format!(
                    "polygon {polygon} of polylist {index} in `{geometry}` has {corners} corners"
                ))
            })?;

        if !matches!(corners, 3 | 4) {
            let unsupported = UnsupportedPolygon {
                geometry: geometry.to_string(),
                polylist: index,
                polygon,
                corners,
            };
            match options.unsupported_polygons {
                PolygonPolicy::Reject => return Err(LoadError::UnsupportedPolygon(unsupported)),
                PolygonPolicy::Skip => {
                    log::warn!("{unsupported}, skipping it");
                    diagnostics.push(Diagnostic::UnsupportedPolygonSize(unsupported));
                    continue;
                }
            }
        }

        let mut compact = [0i16; 4];
        for (corner, slot) in compact.iter_mut().enumerate().take(corners) {
            // Cannot overflow: bounded by `record`.
            let base = start + corner * stride;
            let read = |offset: usize| {
                base.checked_add(offset)
                    .and_then(|at| element.p.get(at))
                    .copied()
                    .ok_or_else(|| {
                        LoadError::malformed(format!(
                            "polylist {index} of `{geometry}` ends inside polygon {polygon}"
                        ))
                    })
            };
            let position = read(layout.vertex_offset)?;
            let normal = read(layout.normal_offset)?;
            *slot = welder.vertex(position, normal)?;
        }

        let triangles = &mut welder.output.triangles;
        triangles.extend_from_slice(&compact[..3]);
        if corners == 4 {
            triangles.extend_from_slice(&[compact[0], compact[2], compact[3]]);
        }
    }

    Ok(welder.output)
}
