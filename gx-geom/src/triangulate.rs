//! Primitive triangulation
//!
//! Flattens strip and quad topologies into plain triangle lists. Degenerate
//! triangles (repeated indices) are preserved, matching the source streams,
//! and unrecognized topologies pass through untouched with a warning.

use gx_common::PrimitiveKind;

use crate::error::Warning;

/// Convert an index stream to a flat triangle list.
///
/// `Triangles` passes through unchanged; strips and quads expand; any other
/// kind is returned as-is together with a [`Warning::UnsupportedPrimitive`].
pub fn to_triangle_indices(
    indices: &[u32],
    primitive: PrimitiveKind,
) -> (Vec<u32>, Option<Warning>) {
    match primitive {
        PrimitiveKind::Triangles => (indices.to_vec(), None),
        PrimitiveKind::TriangleStrip => (from_triangle_strip(indices), None),
        PrimitiveKind::Quads => (from_quads(indices), None),
        other => {
            let warning = Warning::UnsupportedPrimitive {
                opcode: other.opcode(),
            };
            tracing::warn!("{warning}");
            (indices.to_vec(), Some(warning))
        }
    }
}

/// Strip expansion: triangle `k` is `(i_k, i_k+1, i_k+2)`, with the first two
/// corners swapped on odd `k` to keep a consistent winding.
fn from_triangle_strip(indices: &[u32]) -> Vec<u32> {
    if indices.len() < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((indices.len() - 2) * 3);
    for k in 0..indices.len() - 2 {
        if k % 2 == 0 {
            out.extend_from_slice(&[indices[k], indices[k + 1], indices[k + 2]]);
        } else {
            out.extend_from_slice(&[indices[k + 1], indices[k], indices[k + 2]]);
        }
    }
    out
}

/// Quad expansion: `(a,b,c,d)` splits on the `(a,c)` diagonal into `(a,b,c)`
/// and `(a,c,d)`. The diagonal choice is a format convention.
fn from_quads(indices: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len() / 4 * 6);
    for quad in indices.chunks_exact(4) {
        out.extend_from_slice(&[quad[0], quad[1], quad[2]]);
        out.extend_from_slice(&[quad[0], quad[2], quad[3]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangles_pass_through() {
        let (out, warning) = to_triangle_indices(&[5, 6, 7, 8, 9, 10], PrimitiveKind::Triangles);
        assert_eq!(out, vec![5, 6, 7, 8, 9, 10]);
        assert!(warning.is_none());
    }

    #[test]
    fn test_strip_cardinality() {
        for n in 0..12usize {
            let indices: Vec<u32> = (0..n as u32).collect();
            let (out, _) = to_triangle_indices(&indices, PrimitiveKind::TriangleStrip);
            let expected = if n >= 3 { 3 * (n - 2) } else { 0 };
            assert_eq!(out.len(), expected, "strip of {n} indices");
        }
    }

    #[test]
    fn test_strip_alternates_winding() {
        let (out, _) = to_triangle_indices(&[0, 1, 2, 3, 4], PrimitiveKind::TriangleStrip);
        assert_eq!(out, vec![0, 1, 2, 2, 1, 3, 2, 3, 4]);
    }

    #[test]
    fn test_strip_keeps_degenerates() {
        // Repeated indices (strip restart) are not filtered.
        let (out, _) = to_triangle_indices(&[0, 1, 1, 2], PrimitiveKind::TriangleStrip);
        assert_eq!(out, vec![0, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_quad_expansion() {
        let (out, warning) = to_triangle_indices(&[1, 2, 3, 4], PrimitiveKind::Quads);
        assert_eq!(out, vec![1, 2, 3, 1, 3, 4]);
        assert!(warning.is_none());
    }

    #[test]
    fn test_two_quads() {
        let (out, _) = to_triangle_indices(&[0, 1, 2, 3, 4, 5, 6, 7], PrimitiveKind::Quads);
        assert_eq!(out, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_unsupported_passes_through() {
        let (out, warning) = to_triangle_indices(&[0, 1, 2], PrimitiveKind::LineStrip);
        assert_eq!(out, vec![0, 1, 2]);
        assert_eq!(
            warning,
            Some(Warning::UnsupportedPrimitive { opcode: 0xB0 })
        );
    }
}
