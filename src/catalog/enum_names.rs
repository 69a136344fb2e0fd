//! Cached (magnitude, display name) sequences per enum type

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::value::EnumType;

/// One selectable enum entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumName {
    /// Member value widened through the backing type
    pub magnitude: i64,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct EnumNameCache {
    entries: RwLock<HashMap<String, Arc<[EnumName]>>>,
}

impl EnumNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached names for `ty`, building them on first request
    ///
    /// Every caller asking for the same type name gets the same `Arc`.
    pub fn get_or_build(&self, ty: &EnumType) -> Arc<[EnumName]> {
        if let Some(names) = super::read(&self.entries).get(&ty.name) {
            return Arc::clone(names);
        }

        let built: Arc<[EnumName]> = build_names(ty).into();
        let mut entries = super::write(&self.entries);
        // Another caller may have won the race between the two locks
        Arc::clone(entries.entry(ty.name.clone()).or_insert(built))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        super::read(&self.entries).contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        super::read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn build_names(ty: &EnumType) -> Vec<EnumName> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(ty.members.len());

    for member in &ty.members {
        let name = ty.format(member.value);
        if !seen.insert(name.clone()) {
            continue;
        }

        match to_magnitude(ty, member.value) {
            Some(magnitude) => names.push(EnumName { magnitude, name }),
            None => tracing::warn!(
                "Skipping member {}.{}: value {} does not fit an i64 via {:?}",
                ty.name,
                member.name,
                member.value,
                ty.backing
            ),
        }
    }

    tracing::debug!("Cached {} names for enum {}", names.len(), ty.name);
    names
}

/// Widen through the declared backing type first so small and unsigned
/// backings keep their true value
fn to_magnitude(ty: &EnumType, raw: i128) -> Option<i64> {
    if !ty.backing.contains(raw) {
        return None;
    }
    i64::try_from(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IntKind;

    #[test]
    fn test_duplicate_values_keep_first_name() {
        let ty = EnumType::new("Mode", IntKind::I32, false)
            .member("Fast", 1)
            .member("Quick", 1)
            .member("Slow", 2)
            .build();
        let cache = EnumNameCache::new();
        let names = cache.get_or_build(&ty);
        let labels: Vec<_> = names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(labels, vec!["Fast", "Slow"]);
    }

    #[test]
    fn test_unsigned_backing_above_i64_is_skipped() {
        let ty = EnumType::new("Huge", IntKind::U64, false)
            .member("Small", 1)
            .member("Big", u64::MAX as i128)
            .build();
        let names = EnumNameCache::new().get_or_build(&ty);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].magnitude, 1);
    }

    #[test]
    fn test_u32_backing_round_trips_high_bit() {
        let ty = EnumType::new("Mask", IntKind::U32, true)
            .member("High", 0x8000_0000)
            .build();
        let names = EnumNameCache::new().get_or_build(&ty);
        assert_eq!(names[0].magnitude, 0x8000_0000_i64);
    }

    #[test]
    fn test_member_outside_backing_is_skipped() {
        let ty = EnumType::new("Tiny", IntKind::I8, false)
            .member("Ok", 5)
            .member("TooBig", 500)
            .build();
        let names = EnumNameCache::new().get_or_build(&ty);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_same_type_reuses_cached_sequence() {
        let ty = EnumType::new("Severity", IntKind::I32, false)
            .member("Low", 0)
            .member("High", 1)
            .build();
        let cache = EnumNameCache::new();
        let a = cache.get_or_build(&ty);
        let b = cache.get_or_build(&ty);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }
}
