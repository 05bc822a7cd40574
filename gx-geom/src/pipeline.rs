//! Per-polygon pipeline orchestration
//!
//! Ties the codec stages together over the entity model: decode a polygon's
//! display lists into containers, bake rigid skinning, batch across polygons,
//! or re-encode a polygon's geometry in place.
//!
//! Failures are isolated per polygon: every entry point returns one
//! [`PolygonOutcome`] per input polygon, and a malformed display list fails
//! only its own polygon's outcome.

use glam::Mat4;
use gx_common::{GxVertex, Polygon, PrimitiveKind};

use crate::batch::{RenderMesh, VertexContainer, batch_containers};
use crate::decode::decode_display_list;
use crate::encode::encode_vertices;
use crate::error::{CodecError, Warning};
use crate::skin::apply_rigid_skin;
use crate::tables::{AttributeSink, AttributeTables};
use crate::triangulate::to_triangle_indices;

/// Result of one polygon's trip through the pipeline: success with warnings,
/// or failure with reason. Outcome order always matches input polygon order.
#[derive(Debug, Clone)]
pub struct PolygonOutcome<T> {
    pub result: Result<T, CodecError>,
    pub warnings: Vec<Warning>,
}

impl<T> PolygonOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Decode one polygon's display lists into batch-ready containers.
///
/// Each display list decodes to one container with sequential local indices,
/// triangulated where the topology supports it: triangles, strips, and quads
/// resolve to `Triangles`; other kinds keep their topology and raise an
/// [`Warning::UnsupportedPrimitive`].
pub fn decode_polygon(
    polygon: &Polygon,
    tables: &impl AttributeTables,
) -> PolygonOutcome<Vec<VertexContainer>> {
    let mut warnings = Vec::new();
    let mut containers = Vec::with_capacity(polygon.display_lists.len());

    for dl in &polygon.display_lists {
        let vertices = match decode_display_list(dl, &polygon.attributes, tables) {
            Ok(vertices) => vertices,
            Err(err) => {
                return PolygonOutcome {
                    result: Err(err),
                    warnings,
                };
            }
        };

        let local: Vec<u32> = (0..vertices.len() as u32).collect();
        let (indices, warning) = to_triangle_indices(&local, dl.primitive);
        let primitive = match dl.primitive {
            PrimitiveKind::Triangles | PrimitiveKind::TriangleStrip | PrimitiveKind::Quads => {
                PrimitiveKind::Triangles
            }
            other => other,
        };
        warnings.extend(warning);
        containers.push(VertexContainer {
            vertices,
            indices,
            primitive,
        });
    }

    PolygonOutcome {
        result: Ok(containers),
        warnings,
    }
}

/// Decode a slice of polygons, one outcome per polygon.
pub fn decode_polygons(
    polygons: &[Polygon],
    tables: &impl AttributeTables,
) -> Vec<PolygonOutcome<Vec<VertexContainer>>> {
    polygons.iter().map(|p| decode_polygon(p, tables)).collect()
}

/// Decode a slice of polygons across threads.
///
/// Outcome order is identical to [`decode_polygons`]; polygons are
/// independent, so execution order is unobservable.
#[cfg(feature = "parallel")]
pub fn decode_polygons_par(
    polygons: &[Polygon],
    tables: &(impl AttributeTables + Sync),
) -> Vec<PolygonOutcome<Vec<VertexContainer>>> {
    use rayon::prelude::*;
    polygons
        .par_iter()
        .map(|p| decode_polygon(p, tables))
        .collect()
}

/// Produce render-ready meshes for a set of polygons.
///
/// Decodes every polygon, optionally bakes rigid skinning, and batches the
/// containers of all successful polygons by primitive type in first-encounter
/// order. Failed polygons contribute nothing to the batch; their outcome
/// carries the reason.
pub fn drawable_meshes(
    polygons: &[Polygon],
    tables: &impl AttributeTables,
    bones: Option<&[Mat4]>,
) -> (Vec<RenderMesh>, Vec<PolygonOutcome<()>>) {
    let mut outcomes = Vec::with_capacity(polygons.len());
    let mut containers = Vec::new();

    for polygon in polygons {
        let outcome = decode_polygon(polygon, tables);
        match outcome.result {
            Ok(decoded) => {
                for mut container in decoded {
                    if let Some(bones) = bones {
                        container.vertices = apply_rigid_skin(container.vertices, bones);
                    }
                    containers.push(container);
                }
                outcomes.push(PolygonOutcome {
                    result: Ok(()),
                    warnings: outcome.warnings,
                });
            }
            Err(err) => outcomes.push(PolygonOutcome {
                result: Err(err),
                warnings: outcome.warnings,
            }),
        }
    }

    (batch_containers(containers), outcomes)
}

/// Re-encode every display list of a polygon over its own descriptor.
///
/// The polygon's list vector is replaced wholesale on success and left
/// untouched on failure.
pub fn recompress_polygon(
    polygon: &mut Polygon,
    tables: &impl AttributeTables,
    sink: &mut impl AttributeSink,
) -> PolygonOutcome<()> {
    let mut warnings = Vec::new();
    let mut rebuilt = Vec::with_capacity(polygon.display_lists.len());

    for dl in &polygon.display_lists {
        let vertices = match decode_display_list(dl, &polygon.attributes, tables) {
            Ok(vertices) => vertices,
            Err(err) => {
                return PolygonOutcome {
                    result: Err(err),
                    warnings,
                };
            }
        };
        match encode_vertices(&vertices, dl.primitive, &polygon.attributes, sink) {
            Ok(encoded) => {
                warnings.extend(encoded.warnings);
                rebuilt.push(encoded.display_list);
            }
            Err(err) => {
                return PolygonOutcome {
                    result: Err(err),
                    warnings,
                };
            }
        }
    }

    polygon.display_lists = rebuilt;
    PolygonOutcome {
        result: Ok(()),
        warnings,
    }
}

/// Replace a polygon's geometry with an edited working set.
///
/// The vertices are compressed as triangle lists (the compressor applies the
/// per-triplet winding convention) and the polygon's display lists are
/// replaced wholesale. On failure the polygon is left untouched.
pub fn replace_polygon_vertices(
    polygon: &mut Polygon,
    vertices: Vec<GxVertex>,
    sink: &mut impl AttributeSink,
) -> PolygonOutcome<()> {
    match encode_vertices(
        &vertices,
        PrimitiveKind::Triangles,
        &polygon.attributes,
        sink,
    ) {
        Ok(encoded) => {
            polygon.display_lists = vec![encoded.display_list];
            PolygonOutcome {
                result: Ok(()),
                warnings: encoded.warnings,
            }
        }
        Err(err) => PolygonOutcome {
            result: Err(err),
            warnings: Vec::new(),
        },
    }
}
