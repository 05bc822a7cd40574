//! Display list and polygon entity model
//!
//! A display list is one batch of indexed geometry: a primitive opcode, an
//! index stream, and a packed vertex-record stream whose layout is declared
//! by the owning polygon's [`AttributeGroup`]. The asset container owns the
//! polygons; this crate only defines their shape.

use crate::attr::AttributeGroup;

/// Primitive topology opcodes.
///
/// Only `Triangles`, `TriangleStrip`, and `Quads` are triangulated by the
/// pipeline; every other kind passes through unmodified with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Quads,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Lines,
    LineStrip,
    Points,
    Unknown(u8),
}

impl PrimitiveKind {
    /// Classify a display-list opcode.
    pub const fn from_opcode(opcode: u8) -> Self {
        match opcode {
            0x80 => PrimitiveKind::Quads,
            0x90 => PrimitiveKind::Triangles,
            0x98 => PrimitiveKind::TriangleStrip,
            0xA0 => PrimitiveKind::TriangleFan,
            0xA8 => PrimitiveKind::Lines,
            0xB0 => PrimitiveKind::LineStrip,
            0xB8 => PrimitiveKind::Points,
            other => PrimitiveKind::Unknown(other),
        }
    }

    /// The wire opcode.
    pub const fn opcode(self) -> u8 {
        match self {
            PrimitiveKind::Quads => 0x80,
            PrimitiveKind::Triangles => 0x90,
            PrimitiveKind::TriangleStrip => 0x98,
            PrimitiveKind::TriangleFan => 0xA0,
            PrimitiveKind::Lines => 0xA8,
            PrimitiveKind::LineStrip => 0xB0,
            PrimitiveKind::Points => 0xB8,
            PrimitiveKind::Unknown(other) => other,
        }
    }
}

/// One batch of indexed geometry, owned by exactly one polygon.
///
/// The compressor replaces display lists wholesale; they are never patched in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub primitive: PrimitiveKind,
    /// Each index addresses one vertex record in `vertex_data`.
    pub indices: Vec<u16>,
    /// Packed vertex records, laid out per the owning polygon's descriptor.
    pub vertex_data: Vec<u8>,
}

/// An ordered run of display lists sharing one attribute descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub attributes: AttributeGroup,
    pub display_lists: Vec<DisplayList>,
}
