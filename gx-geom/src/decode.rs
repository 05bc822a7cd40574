//! Vertex decompressor
//!
//! Expands a packed display-list stream into structured vertices: one output
//! vertex per index entry, re-reading the full record each time (the format
//! duplicates shared vertices instead of deduplicating them).
//!
//! Pure functions of their inputs: no side effects, no shared state.

use gx_common::quant::read_scaled;
use gx_common::{
    AttrEncoding, AttributeGroup, BoneInfluence, CompType, DisplayList, GxVertex, PrimitiveKind,
};

use crate::error::CodecError;
use crate::tables::AttributeTables;

/// Decode every index entry of a display list into structured vertices.
///
/// Triangle lists come back in the winding convention the compressor expects:
/// each stored triplet is reversed on read, so decoding and re-encoding a
/// triangles list reproduces the stored record order byte-for-byte.
pub fn decode_display_list(
    dl: &DisplayList,
    attrs: &AttributeGroup,
    tables: &impl AttributeTables,
) -> Result<Vec<GxVertex>, CodecError> {
    let mut vertices = decode_vertices(&dl.vertex_data, &dl.indices, attrs, tables)?;
    if dl.primitive == PrimitiveKind::Triangles {
        for triplet in vertices.chunks_exact_mut(3) {
            triplet.swap(0, 2);
        }
    }
    Ok(vertices)
}

/// Decode raw vertex records in index order, without any winding convention.
///
/// Fails with [`CodecError::MalformedStream`] when the stream length is not a
/// multiple of the descriptor's stride or an index addresses past the record
/// count, and with [`CodecError::IndexOutOfBounds`] when an indexed attribute
/// exceeds its table.
pub fn decode_vertices(
    vertex_data: &[u8],
    indices: &[u16],
    attrs: &AttributeGroup,
    tables: &impl AttributeTables,
) -> Result<Vec<GxVertex>, CodecError> {
    let stride = attrs.stride();
    if vertex_data.len() % stride != 0 {
        return Err(CodecError::malformed(format!(
            "vertex stream of {} bytes is not a multiple of the {stride}-byte record stride",
            vertex_data.len()
        )));
    }
    let record_count = vertex_data.len() / stride;

    let mut vertices = Vec::with_capacity(indices.len());
    for &index in indices {
        let index = index as usize;
        if index >= record_count {
            return Err(CodecError::malformed(format!(
                "index {index} addresses past the {record_count} vertex records in the stream"
            )));
        }
        let record = &vertex_data[index * stride..(index + 1) * stride];
        vertices.push(decode_record(record, attrs, tables)?);
    }
    Ok(vertices)
}

/// Decode one packed vertex record.
fn decode_record(
    record: &[u8],
    attrs: &AttributeGroup,
    tables: &impl AttributeTables,
) -> Result<GxVertex, CodecError> {
    let mut vertex = GxVertex::default();
    let mut cursor = 0usize;

    for (pair, layout) in attrs.bones.iter().enumerate() {
        let Some(layout) = layout else { continue };
        let bone = read_uint(record, &mut cursor, layout.index_type)?;
        let weight = read_scaled(record, &mut cursor, layout.weight_type, layout.weight_shift)
            .ok_or_else(truncated)?;
        vertex.influences[pair] = BoneInfluence {
            bone: bone as u16,
            weight,
        };
    }

    for (slot, layout) in attrs.vector_slots() {
        match layout.encoding {
            AttrEncoding::Direct => {
                let mut comps = [0.0f32; 4];
                let count = (layout.comp_count as usize).min(comps.len());
                for comp in comps.iter_mut().take(count) {
                    *comp = read_scaled(record, &mut cursor, layout.comp_type, layout.shift)
                        .ok_or_else(truncated)?;
                }
                vertex.set_components(slot, &comps[..count]);
            }
            AttrEncoding::Index8 | AttrEncoding::Index16 => {
                let width = if layout.encoding == AttrEncoding::Index8 {
                    CompType::U8
                } else {
                    CompType::U16
                };
                let index = read_uint(record, &mut cursor, width)?;
                let comps = tables.lookup(slot, index).ok_or_else(|| {
                    CodecError::IndexOutOfBounds {
                        slot,
                        index,
                        len: tables.table_len(slot),
                    }
                })?;
                vertex.set_components(slot, comps);
            }
        }
    }

    Ok(vertex)
}

/// Read one big-endian unsigned integer field.
fn read_uint(record: &[u8], cursor: &mut usize, width: CompType) -> Result<u32, CodecError> {
    let bytes = record
        .get(*cursor..*cursor + width.byte_width())
        .ok_or_else(truncated)?;
    *cursor += width.byte_width();
    Ok(match width {
        CompType::U8 => bytes[0] as u32,
        CompType::U16 => u16::from_be_bytes([bytes[0], bytes[1]]) as u32,
        _ => {
            return Err(CodecError::malformed(
                "index fields must be unsigned 8- or 16-bit",
            ));
        }
    })
}

fn truncated() -> CodecError {
    CodecError::malformed("vertex record truncated mid-attribute")
}
