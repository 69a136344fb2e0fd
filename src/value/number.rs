//! Numeric setting values
//!
//! Every primitive width is kept as its own variant so parsing and formatting
//! go through the concrete type's own `FromStr`/`Display`. Integer text never
//! round-trips through a float.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::ParseValueError;

/// Concrete numeric type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
}

impl NumberKind {
    pub fn name(self) -> &'static str {
        match self {
            NumberKind::I8 => "i8",
            NumberKind::I16 => "i16",
            NumberKind::I32 => "i32",
            NumberKind::I64 => "i64",
            NumberKind::U8 => "u8",
            NumberKind::U16 => "u16",
            NumberKind::U32 => "u32",
            NumberKind::U64 => "u64",
            NumberKind::F32 => "f32",
            NumberKind::F64 => "f64",
            NumberKind::Decimal => "decimal",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumberKind::F32 | NumberKind::F64)
    }

    pub fn is_integer(self) -> bool {
        !self.is_float() && self != NumberKind::Decimal
    }

    /// Parse text with this kind's own parser (surrounding whitespace ignored)
    pub fn parse(self, text: &str) -> Result<Number, ParseValueError> {
        let s = text.trim();
        let err = || ParseValueError::InvalidNumber {
            kind: self,
            text: text.to_string(),
        };
        Ok(match self {
            NumberKind::I8 => Number::I8(s.parse().map_err(|_| err())?),
            NumberKind::I16 => Number::I16(s.parse().map_err(|_| err())?),
            NumberKind::I32 => Number::I32(s.parse().map_err(|_| err())?),
            NumberKind::I64 => Number::I64(s.parse().map_err(|_| err())?),
            NumberKind::U8 => Number::U8(s.parse().map_err(|_| err())?),
            NumberKind::U16 => Number::U16(s.parse().map_err(|_| err())?),
            NumberKind::U32 => Number::U32(s.parse().map_err(|_| err())?),
            NumberKind::U64 => Number::U64(s.parse().map_err(|_| err())?),
            NumberKind::F32 => Number::F32(s.parse().map_err(|_| err())?),
            NumberKind::F64 => Number::F64(s.parse().map_err(|_| err())?),
            NumberKind::Decimal => Number::Decimal(s.parse().map_err(|_| err())?),
        })
    }

    /// Convert a slider position into this kind
    ///
    /// Integers are rounded to the nearest value. Returns `None` when the
    /// position is not finite or falls outside the type's range.
    pub fn from_f64(self, v: f64) -> Option<Number> {
        if !v.is_finite() {
            return None;
        }
        let r = v.round();
        Some(match self {
            NumberKind::I8 => Number::I8(int_in_range(r, i8::MIN as f64, i8::MAX as f64)? as i8),
            NumberKind::I16 => {
                Number::I16(int_in_range(r, i16::MIN as f64, i16::MAX as f64)? as i16)
            }
            NumberKind::I32 => {
                Number::I32(int_in_range(r, i32::MIN as f64, i32::MAX as f64)? as i32)
            }
            NumberKind::I64 => {
                Number::I64(int_in_range(r, i64::MIN as f64, i64::MAX as f64)? as i64)
            }
            NumberKind::U8 => Number::U8(int_in_range(r, 0.0, u8::MAX as f64)? as u8),
            NumberKind::U16 => Number::U16(int_in_range(r, 0.0, u16::MAX as f64)? as u16),
            NumberKind::U32 => Number::U32(int_in_range(r, 0.0, u32::MAX as f64)? as u32),
            NumberKind::U64 => Number::U64(int_in_range(r, 0.0, u64::MAX as f64)? as u64),
            NumberKind::F32 => {
                if v.abs() > f32::MAX as f64 {
                    return None;
                }
                Number::F32(v as f32)
            }
            NumberKind::F64 => Number::F64(v),
            NumberKind::Decimal => Number::Decimal(Decimal::from_f64(v)?),
        })
    }

    pub fn zero(self) -> Number {
        match self {
            NumberKind::I8 => Number::I8(0),
            NumberKind::I16 => Number::I16(0),
            NumberKind::I32 => Number::I32(0),
            NumberKind::I64 => Number::I64(0),
            NumberKind::U8 => Number::U8(0),
            NumberKind::U16 => Number::U16(0),
            NumberKind::U32 => Number::U32(0),
            NumberKind::U64 => Number::U64(0),
            NumberKind::F32 => Number::F32(0.0),
            NumberKind::F64 => Number::F64(0.0),
            NumberKind::Decimal => Number::Decimal(Decimal::ZERO),
        }
    }
}

fn int_in_range(v: f64, min: f64, max: f64) -> Option<f64> {
    (v >= min && v <= max).then_some(v)
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric value tagged with its concrete kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::I8(_) => NumberKind::I8,
            Number::I16(_) => NumberKind::I16,
            Number::I32(_) => NumberKind::I32,
            Number::I64(_) => NumberKind::I64,
            Number::U8(_) => NumberKind::U8,
            Number::U16(_) => NumberKind::U16,
            Number::U32(_) => NumberKind::U32,
            Number::U64(_) => NumberKind::U64,
            Number::F32(_) => NumberKind::F32,
            Number::F64(_) => NumberKind::F64,
            Number::Decimal(_) => NumberKind::Decimal,
        }
    }

    /// Lossy view used for sliders and cross-kind comparison
    pub fn to_f64(&self) -> f64 {
        match *self {
            Number::I8(v) => v as f64,
            Number::I16(v) => v as f64,
            Number::I32(v) => v as f64,
            Number::I64(v) => v as f64,
            Number::U8(v) => v as f64,
            Number::U16(v) => v as f64,
            Number::U32(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::F32(v) => v as f64,
            Number::F64(v) => v,
            Number::Decimal(v) => v.to_f64().unwrap_or(0.0),
        }
    }

    /// Exact ordering for same-kind values, f64 ordering otherwise
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I8(a), Number::I8(b)) => Some(a.cmp(b)),
            (Number::I16(a), Number::I16(b)) => Some(a.cmp(b)),
            (Number::I32(a), Number::I32(b)) => Some(a.cmp(b)),
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(b)),
            (Number::U8(a), Number::U8(b)) => Some(a.cmp(b)),
            (Number::U16(a), Number::U16(b)) => Some(a.cmp(b)),
            (Number::U32(a), Number::U32(b)) => Some(a.cmp(b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(b)),
            (Number::F32(a), Number::F32(b)) => a.partial_cmp(b),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(b),
            (Number::Decimal(a), Number::Decimal(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Clamp into `[min, max]`, returning the nearest bound when outside
    ///
    /// Incomparable values (NaN) are returned unchanged.
    pub fn clamp(self, min: Number, max: Number) -> Number {
        if self.compare(&min) == Some(Ordering::Less) {
            min
        } else if self.compare(&max) == Some(Ordering::Greater) {
            max
        } else {
            self
        }
    }

    pub fn in_range(&self, min: &Number, max: &Number) -> bool {
        matches!(
            self.compare(min),
            Some(Ordering::Greater | Ordering::Equal)
        ) && matches!(self.compare(max), Some(Ordering::Less | Ordering::Equal))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I8(v) => write!(f, "{}", v),
            Number::I16(v) => write!(f, "{}", v),
            Number::I32(v) => write!(f, "{}", v),
            Number::I64(v) => write!(f, "{}", v),
            Number::U8(v) => write!(f, "{}", v),
            Number::U16(v) => write!(f, "{}", v),
            Number::U32(v) => write!(f, "{}", v),
            Number::U64(v) => write!(f, "{}", v),
            Number::F32(v) => write!(f, "{}", v),
            Number::F64(v) => write!(f, "{}", v),
            Number::Decimal(v) => write!(f, "{}", v),
        }
    }
}
