//! Shared types and utilities for the GX mesh pipeline
//!
//! This crate provides the data model shared between:
//! - `gx-geom` (vertex codec and mesh batching)
//! - the asset container layer that owns polygons and attribute tables
//!
//! # Modules
//!
//! - [`attr`] - Attribute group descriptors (which slots exist, how each is encoded)
//! - [`quant`] - Fixed-point component codecs (integer ↔ f32 with a scale shift)
//! - [`vertex`] - Structured vertex type produced and consumed by the codec
//! - [`display_list`] - Display list and polygon entity model

pub mod attr;
pub mod display_list;
pub mod quant;
pub mod vertex;

// Re-export commonly used descriptor items
pub use attr::{
    AttrEncoding, AttrLayout, AttributeGroup, BonePairLayout, CompType, MAX_INFLUENCES,
    MAX_UV_SETS, SlotId,
};

// Re-export the entity model
pub use display_list::{DisplayList, Polygon, PrimitiveKind};

// Re-export quantization helpers
pub use quant::{Quantized, f32_to_fixed, fixed_to_f32, read_scaled, write_scaled};

// Re-export the structured vertex
pub use vertex::{BONE_NONE, BoneInfluence, GxVertex};
