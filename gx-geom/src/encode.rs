//! Vertex compressor
//!
//! The inverse of [`crate::decode`]: packs structured vertices back into a
//! display list under the same attribute descriptor. Out-of-range fixed-point
//! values are clamped and surfaced as [`Warning::PrecisionLoss`] rather than
//! silently truncated; the call still succeeds.
//!
//! Triangle lists are written in reverse per-triplet order. The decompressor
//! reverses each stored triplet on read, so the pair of conventions cancels
//! and a decode → encode pass reproduces the stored bytes exactly.

use gx_common::quant::write_scaled;
use gx_common::{
    AttrEncoding, AttributeGroup, CompType, DisplayList, GxVertex, PrimitiveKind, SlotId,
};

use crate::error::{CodecError, Warning};
use crate::tables::AttributeSink;

/// A freshly packed display list plus the warnings raised while packing it.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub display_list: DisplayList,
    pub warnings: Vec<Warning>,
}

/// Pack structured vertices into a display list.
///
/// Deterministic: the same vertices, descriptor, and sink state always
/// produce the same byte stream. The emitted index stream is sequential, one
/// record per input vertex.
pub fn encode_vertices(
    vertices: &[GxVertex],
    primitive: PrimitiveKind,
    attrs: &AttributeGroup,
    sink: &mut impl AttributeSink,
) -> Result<Encoded, CodecError> {
    match primitive {
        PrimitiveKind::Triangles if vertices.len() % 3 != 0 => {
            return Err(CodecError::malformed(format!(
                "{} vertices cannot form whole triangles",
                vertices.len()
            )));
        }
        PrimitiveKind::Quads if vertices.len() % 4 != 0 => {
            return Err(CodecError::malformed(format!(
                "{} vertices cannot form whole quads",
                vertices.len()
            )));
        }
        _ => {}
    }
    if vertices.len() > u16::MAX as usize + 1 {
        return Err(CodecError::malformed(format!(
            "{} vertices exceed the 16-bit record index space",
            vertices.len()
        )));
    }

    let mut vertex_data = Vec::with_capacity(vertices.len() * attrs.stride());
    let mut warnings = Vec::new();

    if primitive == PrimitiveKind::Triangles {
        for triplet in vertices.chunks_exact(3) {
            for vertex in triplet.iter().rev() {
                encode_record(vertex, attrs, sink, &mut vertex_data, &mut warnings)?;
            }
        }
    } else {
        for vertex in vertices {
            encode_record(vertex, attrs, sink, &mut vertex_data, &mut warnings)?;
        }
    }

    let indices = (0..vertices.len() as u32).map(|i| i as u16).collect();
    Ok(Encoded {
        display_list: DisplayList {
            primitive,
            indices,
            vertex_data,
        },
        warnings,
    })
}

/// Pack one vertex record in descriptor order.
fn encode_record(
    vertex: &GxVertex,
    attrs: &AttributeGroup,
    sink: &mut impl AttributeSink,
    out: &mut Vec<u8>,
    warnings: &mut Vec<Warning>,
) -> Result<(), CodecError> {
    for (pair, layout) in attrs.bones.iter().enumerate() {
        let Some(layout) = layout else { continue };
        let slot = SlotId::Bone(pair as u8);
        // A declared pair with no influence packs as bone 0, weight 0.
        let influence = vertex.influences[pair];
        let (bone, weight) = if influence.is_present() {
            (influence.bone as u32, influence.weight)
        } else {
            (0, 0.0)
        };
        write_uint(out, bone, layout.index_type, slot)?;
        if write_scaled(out, weight, layout.weight_type, layout.weight_shift) {
            warnings.push(precision_loss(slot, weight, layout.weight_type, layout.weight_shift));
        }
    }

    for (slot, layout) in attrs.vector_slots() {
        let (comps, arity) = vertex.components(slot);
        let count = (layout.comp_count as usize).min(arity);
        match layout.encoding {
            AttrEncoding::Direct => {
                for &value in &comps[..count] {
                    if write_scaled(out, value, layout.comp_type, layout.shift) {
                        warnings.push(precision_loss(slot, value, layout.comp_type, layout.shift));
                    }
                }
            }
            AttrEncoding::Index8 | AttrEncoding::Index16 => {
                let index = sink.intern(slot, &comps[..count]);
                let width = if layout.encoding == AttrEncoding::Index8 {
                    CompType::U8
                } else {
                    CompType::U16
                };
                write_uint(out, index, width, slot)?;
            }
        }
    }

    Ok(())
}

/// Append one big-endian unsigned integer field, checking the declared width.
fn write_uint(out: &mut Vec<u8>, value: u32, width: CompType, slot: SlotId) -> Result<(), CodecError> {
    match width {
        CompType::U8 => {
            if value > u8::MAX as u32 {
                return Err(CodecError::malformed(format!(
                    "{slot:?} index {value} does not fit the declared 8-bit field"
                )));
            }
            out.push(value as u8);
        }
        CompType::U16 => {
            if value > u16::MAX as u32 {
                return Err(CodecError::malformed(format!(
                    "{slot:?} index {value} does not fit the declared 16-bit field"
                )));
            }
            out.extend_from_slice(&(value as u16).to_be_bytes());
        }
        _ => {
            return Err(CodecError::malformed(format!(
                "{slot:?} index fields must be unsigned 8- or 16-bit"
            )));
        }
    }
    Ok(())
}

fn precision_loss(slot: SlotId, value: f32, comp_type: CompType, shift: u8) -> Warning {
    let bound = if value >= 0.0 {
        comp_type.max_int()
    } else {
        comp_type.min_int()
    };
    let warning = Warning::PrecisionLoss {
        slot,
        value,
        limit: bound as f32 / (1u32 << shift) as f32,
    };
    tracing::warn!("{warning}");
    warning
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_display_list, decode_vertices};
    use crate::tables::{AttributeTables, TableSet};
    use glam::Vec3;
    use gx_common::{AttrLayout, BonePairLayout};

    fn position_attrs(shift: u8) -> AttributeGroup {
        AttributeGroup::position_only(AttrLayout::direct(CompType::S16, 3, shift))
    }

    fn vertex_at(x: f32) -> GxVertex {
        GxVertex {
            position: Vec3::new(x, 0.0, 0.0),
            ..GxVertex::default()
        }
    }

    #[test]
    fn test_encode_triangles_reverses_triplets() {
        let attrs = position_attrs(0);
        let verts = [vertex_at(1.0), vertex_at(2.0), vertex_at(3.0)];

        let encoded = encode_vertices(
            &verts,
            PrimitiveKind::Triangles,
            &attrs,
            &mut TableSet::new(),
        )
        .unwrap();

        // Stored record order is v2, v1, v0.
        let stored = decode_vertices(
            &encoded.display_list.vertex_data,
            &[0, 1, 2],
            &attrs,
            &TableSet::new(),
        )
        .unwrap();
        assert_eq!(stored[0].position.x, 3.0);
        assert_eq!(stored[1].position.x, 2.0);
        assert_eq!(stored[2].position.x, 1.0);
    }

    #[test]
    fn test_encode_strip_keeps_order() {
        let attrs = position_attrs(0);
        let verts = [vertex_at(1.0), vertex_at(2.0), vertex_at(3.0)];

        let encoded = encode_vertices(
            &verts,
            PrimitiveKind::TriangleStrip,
            &attrs,
            &mut TableSet::new(),
        )
        .unwrap();
        let stored = decode_vertices(
            &encoded.display_list.vertex_data,
            &[0, 1, 2],
            &attrs,
            &TableSet::new(),
        )
        .unwrap();
        assert_eq!(stored[0].position.x, 1.0);
        assert_eq!(stored[2].position.x, 3.0);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let attrs = position_attrs(8);
        let verts = [vertex_at(1.5), vertex_at(-2.25), vertex_at(0.125)];

        let mut sink = TableSet::new();
        let encoded =
            encode_vertices(&verts, PrimitiveKind::Triangles, &attrs, &mut sink).unwrap();
        assert!(encoded.warnings.is_empty());

        let back = decode_display_list(&encoded.display_list, &attrs, &sink).unwrap();
        assert_eq!(back.len(), 3);
        for (a, b) in verts.iter().zip(&back) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_encode_clamps_and_warns() {
        // S8 at shift 6 represents at most 127/64 ≈ 1.98.
        let attrs =
            AttributeGroup::position_only(AttrLayout::direct(CompType::S8, 3, 6));
        let verts = [vertex_at(100.0)];

        let encoded = encode_vertices(
            &verts,
            PrimitiveKind::Points,
            &attrs,
            &mut TableSet::new(),
        )
        .unwrap();
        assert_eq!(encoded.warnings.len(), 1);
        match &encoded.warnings[0] {
            Warning::PrecisionLoss { slot, value, limit } => {
                assert_eq!(*slot, SlotId::Position);
                assert_eq!(*value, 100.0);
                assert!((limit - 127.0 / 64.0).abs() < 1e-6);
            }
            other => panic!("unexpected warning {other:?}"),
        }

        // The stream still decodes, at the clamped value.
        let back = decode_vertices(
            &encoded.display_list.vertex_data,
            &[0],
            &attrs,
            &TableSet::new(),
        )
        .unwrap();
        assert!((back[0].position.x - 127.0 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_encode_indexed_interns() {
        let mut attrs = position_attrs(0);
        attrs.normal = Some(AttrLayout::indexed(AttrEncoding::Index8, 3));

        let mut up = vertex_at(1.0);
        up.normal = Vec3::Y;
        let verts = [up, up, up];

        let mut sink = TableSet::new();
        let encoded =
            encode_vertices(&verts, PrimitiveKind::Triangles, &attrs, &mut sink).unwrap();

        // One deduplicated table entry, referenced by all three records.
        assert_eq!(sink.table_len(SlotId::Normal), 1);
        let back = decode_display_list(&encoded.display_list, &attrs, &sink).unwrap();
        assert_eq!(back[0].normal, Vec3::Y);
    }

    #[test]
    fn test_encode_rejects_partial_groups() {
        let attrs = position_attrs(0);
        let verts = [vertex_at(0.0), vertex_at(1.0)];

        let err = encode_vertices(
            &verts,
            PrimitiveKind::Triangles,
            &attrs,
            &mut TableSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream { .. }));

        let err = encode_vertices(&verts, PrimitiveKind::Quads, &attrs, &mut TableSet::new())
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream { .. }));
    }

    #[test]
    fn test_encode_bone_pairs() {
        let mut attrs = position_attrs(0);
        attrs.bones[0] = Some(BonePairLayout::new(CompType::U8, CompType::U8, 8));

        let mut v = vertex_at(0.0);
        v.influences[0] = gx_common::BoneInfluence {
            bone: 12,
            weight: 0.5,
        };

        let mut sink = TableSet::new();
        let encoded =
            encode_vertices(&[v], PrimitiveKind::Points, &attrs, &mut sink).unwrap();
        let back = decode_vertices(&encoded.display_list.vertex_data, &[0], &attrs, &sink).unwrap();
        assert_eq!(back[0].influences[0].bone, 12);
        assert_eq!(back[0].influences[0].weight, 0.5);
    }

    #[test]
    fn test_encode_deterministic() {
        let mut attrs = position_attrs(8);
        attrs.uvs[0] = Some(AttrLayout::indexed(AttrEncoding::Index16, 2));

        let mut v = vertex_at(1.0);
        v.uvs[0] = glam::Vec2::new(0.25, 0.75);
        let verts = [v, vertex_at(2.0), vertex_at(3.0)];

        let mut sink_a = TableSet::new();
        let mut sink_b = TableSet::new();
        let a = encode_vertices(&verts, PrimitiveKind::Triangles, &attrs, &mut sink_a).unwrap();
        let b = encode_vertices(&verts, PrimitiveKind::Triangles, &attrs, &mut sink_b).unwrap();
        assert_eq!(a.display_list, b.display_list);
    }
}
