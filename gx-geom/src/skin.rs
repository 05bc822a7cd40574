//! Rigid skin transform
//!
//! Bakes a single bone's current transform into vertex positions and normals,
//! producing a reference pose the render layer can draw without CPU skinning.
//! Only vertices with exactly one influence are touched; blended vertices are
//! left for GPU skinning in the excluded rendering layer.

use glam::{Mat3, Mat4};
use gx_common::GxVertex;

/// Read-only source of bone transforms, borrowed for the duration of a pass.
pub trait BoneTransforms {
    /// World transform of `bone`, or `None` for an unknown index.
    fn transform_of(&self, bone: u16) -> Option<Mat4>;
}

impl BoneTransforms for [Mat4] {
    fn transform_of(&self, bone: u16) -> Option<Mat4> {
        self.get(bone as usize).copied()
    }
}

/// Bake bone transforms into single-influence vertices.
///
/// Positions go through the bone's full transform; normals through the
/// inverse-transpose of its upper 3x3, re-normalized, which stays correct
/// under non-uniform scale. Vertices with zero or multiple influences, and
/// vertices whose bone the provider does not know, come back bit-identical.
pub fn apply_rigid_skin(
    vertices: Vec<GxVertex>,
    bones: &(impl BoneTransforms + ?Sized),
) -> Vec<GxVertex> {
    vertices
        .into_iter()
        .map(|mut vertex| {
            if vertex.influence_count() != 1 {
                return vertex;
            }
            let Some(influence) = vertex.influences.iter().find(|i| i.is_present()) else {
                return vertex;
            };
            let Some(transform) = bones.transform_of(influence.bone) else {
                return vertex;
            };
            vertex.position = transform.transform_point3(vertex.position);
            let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
            vertex.normal = (normal_matrix * vertex.normal).normalize_or_zero();
            vertex
        })
        .collect()
}
