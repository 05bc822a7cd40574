//! Attribute group descriptors
//!
//! An [`AttributeGroup`] declares which vertex attributes a polygon's display
//! lists carry and how each one is stored: inline ("direct") fixed-point or
//! float components, or an 8-/16-bit index into an external attribute table.
//!
//! Both codec directions consult the same descriptor. The byte layout of one
//! vertex record walks the slots in a fixed order:
//!
//! ```text
//! bone pair 0..4 | position | normal | binormal | tangent | color | uv 0..8
//! ```
//!
//! The encoder writes exactly this layout and the decoder expects exactly this
//! layout; a descriptor that disagrees with the stream produces an unreadable
//! asset rather than a crash, so round-trip coverage lives in `gx-geom/tests`.

/// Maximum number of UV sets a descriptor can declare.
pub const MAX_UV_SETS: usize = 8;

/// Maximum number of bone-influence pairs a descriptor can declare.
pub const MAX_INFLUENCES: usize = 4;

// ============================================================================
// Component Storage Types
// ============================================================================

/// Storage type of one attribute component on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompType {
    U8,
    S8,
    U16,
    S16,
    F32,
}

impl CompType {
    /// Byte width of a single component.
    #[inline]
    pub const fn byte_width(self) -> usize {
        match self {
            CompType::U8 | CompType::S8 => 1,
            CompType::U16 | CompType::S16 => 2,
            CompType::F32 => 4,
        }
    }

    /// Whether this type stores raw floats (no fixed-point scaling).
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, CompType::F32)
    }

    /// Smallest representable integer value. Zero for `F32`.
    #[inline]
    pub const fn min_int(self) -> i32 {
        match self {
            CompType::U8 | CompType::U16 => 0,
            CompType::S8 => i8::MIN as i32,
            CompType::S16 => i16::MIN as i32,
            CompType::F32 => 0,
        }
    }

    /// Largest representable integer value. Zero for `F32`.
    #[inline]
    pub const fn max_int(self) -> i32 {
        match self {
            CompType::U8 => u8::MAX as i32,
            CompType::S8 => i8::MAX as i32,
            CompType::U16 => u16::MAX as i32,
            CompType::S16 => i16::MAX as i32,
            CompType::F32 => 0,
        }
    }
}

/// How an attribute's data is referenced from a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrEncoding {
    /// Components stored inline in the vertex record.
    Direct,
    /// 8-bit index into an external attribute table.
    Index8,
    /// 16-bit index into an external attribute table.
    Index16,
}

// ============================================================================
// Slot Identity
// ============================================================================

/// Identifies one attribute slot, for table addressing and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Position,
    Normal,
    Binormal,
    Tangent,
    Color,
    /// UV set 0-7. Set 0 is the primary set.
    Uv(u8),
    /// Bone influence pair 0-3.
    Bone(u8),
}

impl SlotId {
    /// Number of float lanes the slot occupies in a structured vertex.
    ///
    /// Direct reads and table entries may carry fewer components than this
    /// (e.g. XY-only positions, RGB-only colors); missing lanes keep their
    /// default value.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            SlotId::Position | SlotId::Normal | SlotId::Binormal | SlotId::Tangent => 3,
            SlotId::Color => 4,
            SlotId::Uv(_) => 2,
            SlotId::Bone(_) => 2,
        }
    }
}

// ============================================================================
// Slot Layouts
// ============================================================================

/// Declaration of one vector attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrLayout {
    pub encoding: AttrEncoding,
    pub comp_type: CompType,
    /// Components per entry (inline, or per table entry when indexed).
    pub comp_count: u8,
    /// Fixed-point scale exponent: integer components decode as `raw / 2^shift`.
    /// Ignored for `F32` components.
    pub shift: u8,
}

impl AttrLayout {
    /// Inline fixed-point or float components.
    pub const fn direct(comp_type: CompType, comp_count: u8, shift: u8) -> Self {
        Self {
            encoding: AttrEncoding::Direct,
            comp_type,
            comp_count,
            shift,
        }
    }

    /// Table-indexed components with the given index width.
    pub const fn indexed(encoding: AttrEncoding, comp_count: u8) -> Self {
        Self {
            encoding,
            comp_type: CompType::F32,
            comp_count,
            shift: 0,
        }
    }

    /// Bytes this slot contributes to one vertex record.
    #[inline]
    pub const fn record_size(&self) -> usize {
        match self.encoding {
            AttrEncoding::Direct => self.comp_count as usize * self.comp_type.byte_width(),
            AttrEncoding::Index8 => 1,
            AttrEncoding::Index16 => 2,
        }
    }
}

/// Declaration of one bone-influence pair.
///
/// Bone pairs are always stored inline: an unsigned bone index followed by a
/// weight component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonePairLayout {
    /// Index storage type; `U8` or `U16`.
    pub index_type: CompType,
    /// Weight storage type.
    pub weight_type: CompType,
    /// Fixed-point scale exponent for integer weights.
    pub weight_shift: u8,
}

impl BonePairLayout {
    pub const fn new(index_type: CompType, weight_type: CompType, weight_shift: u8) -> Self {
        Self {
            index_type,
            weight_type,
            weight_shift,
        }
    }

    /// Bytes this pair contributes to one vertex record.
    #[inline]
    pub const fn record_size(&self) -> usize {
        self.index_type.byte_width() + self.weight_type.byte_width()
    }
}

// ============================================================================
// Attribute Group
// ============================================================================

/// Immutable per-polygon descriptor of the vertex record layout.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeGroup {
    /// Bone-influence pairs, read first in record order.
    pub bones: [Option<BonePairLayout>; MAX_INFLUENCES],
    /// Position is always present.
    pub position: AttrLayout,
    pub normal: Option<AttrLayout>,
    pub binormal: Option<AttrLayout>,
    pub tangent: Option<AttrLayout>,
    pub color: Option<AttrLayout>,
    pub uvs: [Option<AttrLayout>; MAX_UV_SETS],
}

impl AttributeGroup {
    /// Descriptor with only a position slot.
    pub const fn position_only(position: AttrLayout) -> Self {
        Self {
            bones: [None; MAX_INFLUENCES],
            position,
            normal: None,
            binormal: None,
            tangent: None,
            color: None,
            uvs: [None; MAX_UV_SETS],
        }
    }

    /// Present vector slots in record order (bone pairs excluded).
    pub fn vector_slots(&self) -> impl Iterator<Item = (SlotId, &AttrLayout)> {
        let fixed = [
            (SlotId::Position, Some(&self.position)),
            (SlotId::Normal, self.normal.as_ref()),
            (SlotId::Binormal, self.binormal.as_ref()),
            (SlotId::Tangent, self.tangent.as_ref()),
            (SlotId::Color, self.color.as_ref()),
        ];
        let uvs = self
            .uvs
            .iter()
            .enumerate()
            .map(|(i, uv)| (SlotId::Uv(i as u8), uv.as_ref()));
        fixed
            .into_iter()
            .chain(uvs)
            .filter_map(|(slot, layout)| layout.map(|l| (slot, l)))
    }

    /// Total bytes of one vertex record under this descriptor.
    pub fn stride(&self) -> usize {
        let bone_bytes: usize = self
            .bones
            .iter()
            .flatten()
            .map(BonePairLayout::record_size)
            .sum();
        let vector_bytes: usize = self
            .vector_slots()
            .map(|(_, layout)| layout.record_size())
            .sum();
        bone_bytes + vector_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comp_type_widths() {
        assert_eq!(CompType::U8.byte_width(), 1);
        assert_eq!(CompType::S8.byte_width(), 1);
        assert_eq!(CompType::U16.byte_width(), 2);
        assert_eq!(CompType::S16.byte_width(), 2);
        assert_eq!(CompType::F32.byte_width(), 4);
    }

    #[test]
    fn test_record_size_direct_vs_indexed() {
        let direct = AttrLayout::direct(CompType::S16, 3, 8);
        assert_eq!(direct.record_size(), 6);

        let idx8 = AttrLayout::indexed(AttrEncoding::Index8, 3);
        assert_eq!(idx8.record_size(), 1);

        let idx16 = AttrLayout::indexed(AttrEncoding::Index16, 3);
        assert_eq!(idx16.record_size(), 2);
    }

    #[test]
    fn test_stride_position_only() {
        let attrs = AttributeGroup::position_only(AttrLayout::direct(CompType::S16, 3, 8));
        assert_eq!(attrs.stride(), 6);

        let attrs = AttributeGroup::position_only(AttrLayout::direct(CompType::F32, 3, 0));
        assert_eq!(attrs.stride(), 12);
    }

    #[test]
    fn test_stride_full_record() {
        let mut attrs = AttributeGroup::position_only(AttrLayout::direct(CompType::S16, 3, 8));
        attrs.bones[0] = Some(BonePairLayout::new(CompType::U8, CompType::U8, 8));
        attrs.normal = Some(AttrLayout::direct(CompType::S8, 3, 6));
        attrs.color = Some(AttrLayout::indexed(AttrEncoding::Index16, 4));
        attrs.uvs[0] = Some(AttrLayout::direct(CompType::S16, 2, 13));

        // 2 (bone pair) + 6 (position) + 3 (normal) + 2 (color index) + 4 (uv)
        assert_eq!(attrs.stride(), 17);
    }

    #[test]
    fn test_vector_slot_order() {
        let mut attrs = AttributeGroup::position_only(AttrLayout::direct(CompType::F32, 3, 0));
        attrs.color = Some(AttrLayout::direct(CompType::U8, 4, 8));
        attrs.uvs[1] = Some(AttrLayout::direct(CompType::S16, 2, 13));

        let slots: Vec<SlotId> = attrs.vector_slots().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![SlotId::Position, SlotId::Color, SlotId::Uv(1)]);
    }

    #[test]
    fn test_slot_arity() {
        assert_eq!(SlotId::Position.arity(), 3);
        assert_eq!(SlotId::Color.arity(), 4);
        assert_eq!(SlotId::Uv(3).arity(), 2);
    }
}
