//! GX display-list vertex codec and mesh batching
//!
//! Translates the packed, attribute-group-driven display-list format into
//! structured vertices and back, and turns decoded geometry into the minimum
//! number of render-ready meshes.
//!
//! # Modules
//!
//! - [`decode`] - Display-list stream → structured vertices
//! - [`encode`] - Structured vertices → display-list stream
//! - [`triangulate`] - Strip/quad topologies → flat triangle lists
//! - [`skin`] - Rigid (single-influence) bone baking
//! - [`batch`] - Merge containers by primitive type
//! - [`pipeline`] - Per-polygon orchestration with isolated failures
//! - [`tables`] - Indexed-attribute lookup and interning
//! - [`error`] - Error and warning taxonomy
//!
//! Everything is a pure synchronous transform over owned data: each stage
//! consumes its input sequence and returns a new one, and the only borrowed
//! state (bone transforms, attribute tables) is read-only for the duration of
//! a call. The `parallel` feature adds a rayon fan-out across polygons with
//! no observable ordering difference.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod skin;
pub mod tables;
pub mod triangulate;

pub use batch::{RenderMesh, VertexContainer, batch_containers};
pub use decode::{decode_display_list, decode_vertices};
pub use encode::{Encoded, encode_vertices};
pub use error::{CodecError, Warning};
pub use pipeline::{
    PolygonOutcome, decode_polygon, decode_polygons, drawable_meshes, recompress_polygon,
    replace_polygon_vertices,
};
#[cfg(feature = "parallel")]
pub use pipeline::decode_polygons_par;
pub use skin::{BoneTransforms, apply_rigid_skin};
pub use tables::{AttributeSink, AttributeTables, TableSet};
pub use triangulate::to_triangle_indices;
