//! Payload layout tables
//!
//! Each message kind has a fixed-size payload. A layout table lists every
//! populated field with its byte offset and slot encoding; bytes not covered
//! by any field stay zero.

use std::fmt;

use super::FieldValue;

/// Slot encoding of a payload field (all multi-byte slots are little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    I8,
    /// Unsigned 16-bit
    U16,
    /// Signed 16-bit
    I16,
    /// Unsigned 32-bit
    U32,
    /// Signed 32-bit
    I32,
    /// Unsigned 64-bit
    U64,
    /// IEEE-754 single precision
    F32,
    /// Signed 32-bit holding degrees scaled by 1e7
    DegE7,
}

/// Why a value was refused by a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reject {
    OutOfRange,
    TypeMismatch,
}

const DEG_E7_SCALE: f64 = 1e7;
const DEG_E7_INT_SCALE: i128 = 10_000_000;
/// Largest integer magnitude an f32 holds exactly (2^24).
const F32_EXACT_INT: i128 = 1 << 24;

impl FieldType {
    /// Slot width in bytes
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 | Self::DegE7 => 4,
            Self::U64 => 8,
        }
    }

    /// Inclusive integer bounds, `None` for floating-point slots
    #[must_use]
    pub const fn bounds(self) -> Option<(i128, i128)> {
        match self {
            Self::U8 => Some((0, u8::MAX as i128)),
            Self::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::U16 => Some((0, u16::MAX as i128)),
            Self::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::U32 => Some((0, u32::MAX as i128)),
            Self::I32 | Self::DegE7 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::U64 => Some((0, u64::MAX as i128)),
            Self::F32 => None,
        }
    }

    /// Write `value` into `slot` (exactly `width()` bytes).
    ///
    /// `DegE7` slots take degrees whether given as a float or an integer.
    /// `F32` slots take integers only up to 2^24 in magnitude, where every
    /// integer is exactly representable. Nothing is written when the value
    /// is refused.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub(crate) fn write(self, slot: &mut [u8], value: FieldValue) -> Result<(), Reject> {
        debug_assert_eq!(slot.len(), self.width());

        match self {
            Self::F32 => {
                let v = match value {
                    FieldValue::Float(v) => {
                        if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                            return Err(Reject::OutOfRange);
                        }
                        v as f32
                    }
                    FieldValue::Int(v) if i128::from(v).abs() <= F32_EXACT_INT => v as f32,
                    FieldValue::UInt(v) if i128::from(v) <= F32_EXACT_INT => v as f32,
                    FieldValue::Int(_) | FieldValue::UInt(_) => return Err(Reject::OutOfRange),
                };
                slot.copy_from_slice(&v.to_le_bytes());
                return Ok(());
            }
            Self::DegE7 => {
                let scaled = match value {
                    FieldValue::Float(degrees) => (degrees * DEG_E7_SCALE).trunc(),
                    FieldValue::Int(degrees) => (i128::from(degrees) * DEG_E7_INT_SCALE) as f64,
                    FieldValue::UInt(degrees) => (i128::from(degrees) * DEG_E7_INT_SCALE) as f64,
                };
                if !scaled.is_finite()
                    || scaled < f64::from(i32::MIN)
                    || scaled > f64::from(i32::MAX)
                {
                    return Err(Reject::OutOfRange);
                }
                slot.copy_from_slice(&(scaled as i32).to_le_bytes());
                return Ok(());
            }
            _ => {}
        }

        let raw = value.as_integer().ok_or(Reject::TypeMismatch)?;
        let (min, max) = self.bounds().ok_or(Reject::TypeMismatch)?;
        if raw < min || raw > max {
            return Err(Reject::OutOfRange);
        }

        match self {
            Self::U8 => slot[0] = raw as u8,
            Self::I8 => slot[0] = (raw as i8).to_le_bytes()[0],
            Self::U16 => slot.copy_from_slice(&(raw as u16).to_le_bytes()),
            Self::I16 => slot.copy_from_slice(&(raw as i16).to_le_bytes()),
            Self::U32 => slot.copy_from_slice(&(raw as u32).to_le_bytes()),
            Self::I32 => slot.copy_from_slice(&(raw as i32).to_le_bytes()),
            Self::U64 => slot.copy_from_slice(&(raw as u64).to_le_bytes()),
            Self::F32 | Self::DegE7 => unreachable!("scaled slots handled above"),
        }
        Ok(())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::DegE7 => "degE7",
        };
        f.write_str(name)
    }
}

/// One populated payload field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name used in [`Fields`](super::Fields)
    pub name: &'static str,
    /// Byte offset within the payload
    pub offset: usize,
    /// Slot encoding
    pub ty: FieldType,
}

impl FieldSpec {
    const fn new(name: &'static str, offset: usize, ty: FieldType) -> Self {
        Self { name, offset, ty }
    }

    /// Byte range covered within the payload
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.ty.width()
    }
}

use FieldType::{DegE7, F32, I8, I16, I32, U8, U16, U32, U64};

pub(crate) const HEARTBEAT: &[FieldSpec] = &[
    FieldSpec::new("custom_mode", 0, U32),
    FieldSpec::new("type", 4, U8),
    FieldSpec::new("autopilot", 5, U8),
    FieldSpec::new("base_mode", 6, U8),
    FieldSpec::new("system_status", 7, U8),
    FieldSpec::new("mavlink_version", 8, U8),
];

pub(crate) const SYS_STATUS: &[FieldSpec] = &[
    FieldSpec::new("voltage_battery", 14, U16),
    FieldSpec::new("current_battery", 16, I16),
    FieldSpec::new("battery_remaining", 21, I8),
];

pub(crate) const GPS_RAW_INT: &[FieldSpec] = &[
    FieldSpec::new("time_usec", 0, U64),
    FieldSpec::new("fix_type", 8, U8),
    FieldSpec::new("lat", 9, DegE7),
    FieldSpec::new("lon", 13, DegE7),
    FieldSpec::new("alt", 17, I32),
    FieldSpec::new("eph", 21, U16),
    FieldSpec::new("epv", 23, U16),
    FieldSpec::new("vel", 25, U16),
    FieldSpec::new("cog", 27, U16),
    FieldSpec::new("satellites_visible", 29, U8),
];

pub(crate) const ATTITUDE: &[FieldSpec] = &[
    FieldSpec::new("time_boot_ms", 0, U32),
    FieldSpec::new("roll", 4, F32),
    FieldSpec::new("pitch", 8, F32),
    FieldSpec::new("yaw", 12, F32),
    FieldSpec::new("rollspeed", 16, F32),
    FieldSpec::new("pitchspeed", 20, F32),
    FieldSpec::new("yawspeed", 24, F32),
];

pub(crate) const VFR_HUD: &[FieldSpec] = &[
    FieldSpec::new("airspeed", 0, F32),
    FieldSpec::new("groundspeed", 4, F32),
    FieldSpec::new("heading", 8, F32),
    FieldSpec::new("alt", 12, F32),
    FieldSpec::new("throttle", 16, U16),
];
