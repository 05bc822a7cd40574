//! Fixed-point component codecs
//!
//! Converts between wire components and f32 values:
//! - integer components scale by a power-of-two shift (`raw / 2^shift`)
//! - `F32` components pass through unscaled
//!
//! All multi-byte components are big-endian on the wire.

use crate::attr::CompType;

/// Result of quantizing an f32 to a fixed-point component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized {
    /// Value on the integer grid, clamped into the component type's range.
    pub raw: i32,
    /// True when the scaled value fell outside the representable range.
    pub clamped: bool,
}

/// Recover an f32 from a fixed-point integer component.
#[inline]
pub fn fixed_to_f32(raw: i32, shift: u8) -> f32 {
    raw as f32 / (1u32 << shift) as f32
}

/// Quantize an f32 onto the fixed-point grid of the given component type.
///
/// Rounds half away from zero, then clamps into the type's integer range;
/// `clamped` reports whether the value exceeded the representable range.
#[inline]
pub fn f32_to_fixed(value: f32, comp_type: CompType, shift: u8) -> Quantized {
    let scaled = (value * (1u32 << shift) as f32).round();
    let min = comp_type.min_int() as f32;
    let max = comp_type.max_int() as f32;
    Quantized {
        raw: scaled.clamp(min, max) as i32,
        clamped: scaled < min || scaled > max,
    }
}

/// Read one component at `bytes[*cursor..]`, advancing the cursor.
///
/// Integer components are dequantized with `shift`; `F32` reads raw bits.
/// Returns `None` when the slice is too short.
pub fn read_scaled(bytes: &[u8], cursor: &mut usize, comp_type: CompType, shift: u8) -> Option<f32> {
    let width = comp_type.byte_width();
    let field = bytes.get(*cursor..*cursor + width)?;
    *cursor += width;

    let value = match comp_type {
        CompType::U8 => fixed_to_f32(field[0] as i32, shift),
        CompType::S8 => fixed_to_f32(field[0] as i8 as i32, shift),
        CompType::U16 => fixed_to_f32(u16::from_be_bytes([field[0], field[1]]) as i32, shift),
        CompType::S16 => fixed_to_f32(i16::from_be_bytes([field[0], field[1]]) as i32, shift),
        CompType::F32 => f32::from_be_bytes([field[0], field[1], field[2], field[3]]),
    };
    Some(value)
}

/// Append one component to `out`, quantizing integers onto the fixed-point
/// grid. Returns whether the value was clamped (always false for `F32`).
pub fn write_scaled(out: &mut Vec<u8>, value: f32, comp_type: CompType, shift: u8) -> bool {
    if comp_type.is_float() {
        out.extend_from_slice(&value.to_be_bytes());
        return false;
    }

    let q = f32_to_fixed(value, comp_type, shift);
    match comp_type {
        CompType::U8 => out.push(q.raw as u8),
        CompType::S8 => out.push(q.raw as i8 as u8),
        CompType::U16 => out.extend_from_slice(&(q.raw as u16).to_be_bytes()),
        CompType::S16 => out.extend_from_slice(&(q.raw as i16).to_be_bytes()),
        CompType::F32 => unreachable!(),
    }
    q.clamped
}
