//! Structured vertex type
//!
//! [`GxVertex`] is the decoded form of one display-list vertex record. It is
//! transient: the decoder produces a fresh sequence, every pipeline stage
//! consumes its input and returns a new owned sequence, and nothing persists
//! it.

use glam::{Vec2, Vec3, Vec4};

use crate::attr::{MAX_INFLUENCES, MAX_UV_SETS, SlotId};

/// Sentinel bone index for an absent influence slot.
pub const BONE_NONE: u16 = u16::MAX;

/// One bone influence: bone index plus blend weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInfluence {
    pub bone: u16,
    pub weight: f32,
}

impl BoneInfluence {
    /// The absent influence: sentinel index, zero weight.
    pub const NONE: Self = Self {
        bone: BONE_NONE,
        weight: 0.0,
    };

    #[inline]
    pub fn is_present(&self) -> bool {
        self.bone != BONE_NONE
    }
}

/// Decoded vertex with every attribute expanded to floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GxVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
    pub tangent: Vec3,
    pub color: Vec4,
    /// All declared UV sets; `uvs[0]` is the primary set.
    pub uvs: [Vec2; MAX_UV_SETS],
    pub influences: [BoneInfluence; MAX_INFLUENCES],
}

impl Default for GxVertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            binormal: Vec3::ZERO,
            tangent: Vec3::ZERO,
            color: Vec4::ONE,
            uvs: [Vec2::ZERO; MAX_UV_SETS],
            influences: [BoneInfluence::NONE; MAX_INFLUENCES],
        }
    }
}

impl GxVertex {
    /// The primary UV set.
    #[inline]
    pub fn uv(&self) -> Vec2 {
        self.uvs[0]
    }

    /// Number of present bone influences.
    pub fn influence_count(&self) -> usize {
        self.influences.iter().filter(|i| i.is_present()).count()
    }

    /// Store decoded components into a vector slot.
    ///
    /// Accepts fewer components than the slot's arity; missing lanes keep
    /// their default (zero, alpha stays 1). Bone slots are set through
    /// `influences` directly, not through this path.
    pub fn set_components(&mut self, slot: SlotId, comps: &[f32]) {
        let count = comps.len().min(slot.arity());
        match slot {
            SlotId::Position => {
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    self.position[lane] = c;
                }
            }
            SlotId::Normal => {
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    self.normal[lane] = c;
                }
            }
            SlotId::Binormal => {
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    self.binormal[lane] = c;
                }
            }
            SlotId::Tangent => {
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    self.tangent[lane] = c;
                }
            }
            SlotId::Color => {
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    self.color[lane] = c;
                }
            }
            SlotId::Uv(set) => {
                let uv = &mut self.uvs[set as usize];
                for (lane, &c) in comps.iter().take(count).enumerate() {
                    uv[lane] = c;
                }
            }
            SlotId::Bone(_) => {}
        }
    }

    /// Read a vector slot's lanes at full arity.
    ///
    /// Returns a fixed buffer plus the slot's arity; callers wanting the
    /// declared component count take a prefix.
    pub fn components(&self, slot: SlotId) -> ([f32; 4], usize) {
        let mut buf = [0.0f32; 4];
        let arity = slot.arity();
        match slot {
            SlotId::Position => buf[..3].copy_from_slice(&self.position.to_array()),
            SlotId::Normal => buf[..3].copy_from_slice(&self.normal.to_array()),
            SlotId::Binormal => buf[..3].copy_from_slice(&self.binormal.to_array()),
            SlotId::Tangent => buf[..3].copy_from_slice(&self.tangent.to_array()),
            SlotId::Color => buf.copy_from_slice(&self.color.to_array()),
            SlotId::Uv(set) => buf[..2].copy_from_slice(&self.uvs[set as usize].to_array()),
            SlotId::Bone(_) => {}
        }
        (buf, arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vertex() {
        let v = GxVertex::default();
        assert_eq!(v.position, Vec3::ZERO);
        assert_eq!(v.color, Vec4::ONE);
        assert_eq!(v.influence_count(), 0);
        for influence in v.influences {
            assert!(!influence.is_present());
            assert_eq!(influence.weight, 0.0);
        }
    }

    #[test]
    fn test_set_components_partial() {
        let mut v = GxVertex::default();

        // XY-only position leaves z at its default.
        v.set_components(SlotId::Position, &[1.0, 2.0]);
        assert_eq!(v.position, Vec3::new(1.0, 2.0, 0.0));

        // RGB-only color leaves alpha at 1.
        v.set_components(SlotId::Color, &[0.25, 0.5, 0.75]);
        assert_eq!(v.color, Vec4::new(0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn test_components_roundtrip() {
        let mut v = GxVertex::default();
        v.set_components(SlotId::Uv(2), &[0.5, 0.25]);

        let (buf, arity) = v.components(SlotId::Uv(2));
        assert_eq!(arity, 2);
        assert_eq!(&buf[..2], &[0.5, 0.25]);
    }

    #[test]
    fn test_influence_count() {
        let mut v = GxVertex::default();
        v.influences[0] = BoneInfluence {
            bone: 4,
            weight: 0.75,
        };
        v.influences[1] = BoneInfluence {
            bone: 9,
            weight: 0.25,
        };
        assert_eq!(v.influence_count(), 2);
    }
}
