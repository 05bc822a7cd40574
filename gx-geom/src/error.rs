//! Error and warning taxonomy
//!
//! Failures are values: a fatal [`CodecError`] ends one decode or encode
//! call, never a sibling polygon's. Recoverable conditions are collected as
//! [`Warning`]s next to the successful result and logged where they occur.

use gx_common::SlotId;
use thiserror::Error;

/// Fatal error for a single decode or encode call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Stream length or index structure disagrees with the declared layout.
    #[error("malformed display list stream: {reason}")]
    MalformedStream { reason: String },

    /// Indexed-attribute lookup exceeds the addressed table's bound.
    #[error("{slot:?} index {index} out of bounds for table of {len} entries")]
    IndexOutOfBounds {
        slot: SlotId,
        index: u32,
        len: usize,
    },
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedStream {
            reason: reason.into(),
        }
    }
}

/// Recoverable condition reported alongside a successful result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// The compressor clamped an out-of-range value into the declared
    /// fixed-point width and continued.
    #[error("{slot:?} value {value} clamped to fixed-point limit {limit}")]
    PrecisionLoss { slot: SlotId, value: f32, limit: f32 },

    /// A primitive type the pipeline does not triangulate; its indices passed
    /// through unmodified.
    #[error("unsupported primitive type 0x{opcode:02X}, passing indices through")]
    UnsupportedPrimitive { opcode: u8 },
}
