//! Mesh batching
//!
//! Merges per-display-list vertex containers into the minimum number of
//! render-ready meshes: one per distinct primitive type, in first-encounter
//! order. Indices are rebased onto the merged vertex buffer; primitive types
//! are never merged with each other because their triangulation conventions
//! differ.

use hashbrown::HashMap;

use gx_common::{GxVertex, PrimitiveKind};

/// Decoded geometry of one display list, ready for batching.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexContainer {
    pub vertices: Vec<GxVertex>,
    /// Indices local to `vertices`.
    pub indices: Vec<u32>,
    /// Topology after triangulation (strips and quads resolve to triangles).
    pub primitive: PrimitiveKind,
}

/// Merged draw batch handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<GxVertex>,
    pub indices: Vec<u32>,
    pub primitive: PrimitiveKind,
}

impl RenderMesh {
    /// Index buffer as bytes, for GPU upload by the caller.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Merge containers into one mesh per primitive type.
///
/// Grouping is by primitive type only; output order follows the first
/// encounter of each type in the input sequence. Each container's indices are
/// offset by the running vertex count of its group, so local indices stay
/// valid in the merged buffer.
pub fn batch_containers(containers: Vec<VertexContainer>) -> Vec<RenderMesh> {
    let mut meshes: Vec<RenderMesh> = Vec::new();
    let mut group_of: HashMap<PrimitiveKind, usize> = HashMap::new();

    for container in containers {
        let group = *group_of.entry(container.primitive).or_insert_with(|| {
            meshes.push(RenderMesh {
                vertices: Vec::new(),
                indices: Vec::new(),
                primitive: container.primitive,
            });
            meshes.len() - 1
        });

        let mesh = &mut meshes[group];
        let base = mesh.vertices.len() as u32;
        mesh.indices
            .extend(container.indices.iter().map(|&i| i + base));
        mesh.vertices.extend(container.vertices);
    }

    meshes
}
