//! Enum and bit-flags enum types
//!
//! Member values are held as `i128` so every backing width (including `u64`
//! members above `i64::MAX`) is representable without loss.

use std::fmt;
use std::sync::Arc;

use super::ParseValueError;

/// Declared backing integral type of an enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    pub fn min(self) -> i128 {
        match self {
            IntKind::I8 => i8::MIN as i128,
            IntKind::I16 => i16::MIN as i128,
            IntKind::I32 => i32::MIN as i128,
            IntKind::I64 => i64::MIN as i128,
            IntKind::U8 | IntKind::U16 | IntKind::U32 | IntKind::U64 => 0,
        }
    }

    pub fn max(self) -> i128 {
        match self {
            IntKind::I8 => i8::MAX as i128,
            IntKind::I16 => i16::MAX as i128,
            IntKind::I32 => i32::MAX as i128,
            IntKind::I64 => i64::MAX as i128,
            IntKind::U8 => u8::MAX as i128,
            IntKind::U16 => u16::MAX as i128,
            IntKind::U32 => u32::MAX as i128,
            IntKind::U64 => u64::MAX as i128,
        }
    }

    pub fn contains(self, raw: i128) -> bool {
        raw >= self.min() && raw <= self.max()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i128,
}

/// Shape of an enum type, static for the life of the process
#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub backing: IntKind,
    /// Carries the bit-flags marker
    pub flags: bool,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, backing: IntKind, flags: bool) -> Self {
        Self {
            name: name.into(),
            backing,
            flags,
            members: Vec::new(),
        }
    }

    /// Builder-style member declaration, in declaration order
    pub fn member(mut self, name: impl Into<String>, value: i128) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn member_named(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Display string for a raw value
    ///
    /// The first declared member with the value wins. Flags enums decompose
    /// the value into member names (ascending by value, comma separated);
    /// anything that cannot be named prints as its integer.
    pub fn format(&self, raw: i128) -> String {
        if let Some(m) = self.members.iter().find(|m| m.value == raw) {
            return m.name.clone();
        }
        if !self.flags || raw <= 0 {
            return raw.to_string();
        }

        let mut bits: Vec<&EnumMember> = self.members.iter().filter(|m| m.value > 0).collect();
        // Stable sort keeps declaration order among equal values
        bits.sort_by(|a, b| b.value.cmp(&a.value));

        let mut remaining = raw;
        let mut picked: Vec<&EnumMember> = Vec::new();
        for m in bits {
            if remaining & m.value == m.value {
                remaining &= !m.value;
                picked.push(m);
                if remaining == 0 {
                    break;
                }
            }
        }
        if remaining != 0 {
            return raw.to_string();
        }

        picked.reverse();
        picked
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse an integer literal or a comma-separated list of member names
    pub fn parse(self: &Arc<Self>, text: &str) -> Result<EnumValue, ParseValueError> {
        let s = text.trim();
        if s.is_empty() {
            return Err(ParseValueError::EmptyEnum {
                ty: self.name.clone(),
            });
        }

        if let Ok(raw) = s.parse::<i128>() {
            if !self.backing.contains(raw) {
                return Err(ParseValueError::OutOfRange {
                    ty: self.name.clone(),
                    text: s.to_string(),
                });
            }
            return Ok(self.value(raw));
        }

        let mut raw = 0i128;
        for part in s.split(',') {
            let name = part.trim();
            let member = self
                .member_named(name)
                .ok_or_else(|| ParseValueError::UnknownMember {
                    ty: self.name.clone(),
                    name: name.to_string(),
                })?;
            raw |= member.value;
        }
        Ok(self.value(raw))
    }

    pub fn value(self: &Arc<Self>, raw: i128) -> EnumValue {
        EnumValue {
            ty: Arc::clone(self),
            raw,
        }
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// An instance of an enum type
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub ty: Arc<EnumType>,
    pub raw: i128,
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.ty.name == other.ty.name
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty.format(self.raw))
    }
}
