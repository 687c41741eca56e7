//! Pluggable comparison policies
//!
//! A criteria object decides which entities are visible to the comparison at
//! all, what constitutes a logical difference, and which differences are
//! binary-incompatible. The three canonical policies share the difference
//! predicates (provided as trait defaults) and vary only in visibility.

use std::collections::BTreeSet;

use crate::classfile::{AccessFlags, ClassInfo, FieldInfo, MethodInfo};

use super::rules;

/// Policy driving the differ: visibility filter plus difference predicates.
pub trait DiffCriteria {
    /// Include this class in the comparison at all.
    fn valid_class(&self, info: &ClassInfo) -> bool;

    /// Include this method in the comparison at all.
    fn valid_method(&self, info: &MethodInfo) -> bool;

    /// Include this field in the comparison at all.
    fn valid_field(&self, info: &FieldInfo) -> bool;

    /// Access, superclass or interface-set change.
    fn class_differs(&self, old: &ClassInfo, new: &ClassInfo) -> bool {
        if rules::is_class_access_change(old.access, new.access) {
            return true;
        }
        // The root class legitimately has no superclass.
        if old.supername != new.supername {
            return true;
        }
        let old_interfaces: BTreeSet<&str> = old.interfaces.iter().map(String::as_str).collect();
        let new_interfaces: BTreeSet<&str> = new.interfaces.iter().map(String::as_str).collect();
        old_interfaces != new_interfaces
    }

    /// Access or throws-clause change. The descriptor is part of the method
    /// key and is never consulted here, so overload identity survives the
    /// changed-bucket intersection.
    fn method_differs(&self, old: &MethodInfo, new: &MethodInfo) -> bool {
        rules::is_member_access_change(old.access, new.access)
            || rules::is_throws_clause_change(old.exceptions.as_deref(), new.exceptions.as_deref())
    }

    /// Access change alone; a throws-only change is binary-compatible.
    fn method_differs_binary(&self, old: &MethodInfo, new: &MethodInfo) -> bool {
        rules::is_member_access_change(old.access, new.access)
    }

    /// Access or constant-value change.
    fn field_differs(&self, old: &FieldInfo, new: &FieldInfo) -> bool {
        rules::is_member_access_change(old.access, new.access)
            || rules::is_field_value_change(old.value.as_ref(), new.value.as_ref())
    }

    /// Access change alone; a constant-value change is binary-compatible.
    fn field_differs_binary(&self, old: &FieldInfo, new: &FieldInfo) -> bool {
        rules::is_member_access_change(old.access, new.access)
    }
}

/// Only non-synthetic, public entities are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicDiffCriteria;

impl DiffCriteria for PublicDiffCriteria {
    fn valid_class(&self, info: &ClassInfo) -> bool {
        !info.is_synthetic() && info.is_public()
    }

    fn valid_method(&self, info: &MethodInfo) -> bool {
        !info.is_synthetic() && info.is_public()
    }

    fn valid_field(&self, info: &FieldInfo) -> bool {
        !info.is_synthetic() && info.is_public()
    }
}

/// Non-synthetic entities that are public or protected are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicProtectedDiffCriteria;

impl DiffCriteria for PublicProtectedDiffCriteria {
    fn valid_class(&self, info: &ClassInfo) -> bool {
        !info.is_synthetic() && (info.is_public() || info.is_protected())
    }

    fn valid_method(&self, info: &MethodInfo) -> bool {
        !info.is_synthetic() && (info.is_public() || info.is_protected())
    }

    fn valid_field(&self, info: &FieldInfo) -> bool {
        !info.is_synthetic() && (info.is_public() || info.is_protected())
    }
}

/// All non-synthetic entities are visible; private ones only when requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleDiffCriteria {
    include_private: bool,
}

impl SimpleDiffCriteria {
    pub fn new(include_private: bool) -> Self {
        Self { include_private }
    }
}

impl DiffCriteria for SimpleDiffCriteria {
    fn valid_class(&self, info: &ClassInfo) -> bool {
        !info.is_synthetic() && (self.include_private || !info.is_private())
    }

    fn valid_method(&self, info: &MethodInfo) -> bool {
        !info.is_synthetic() && (self.include_private || !info.is_private())
    }

    fn valid_field(&self, info: &FieldInfo) -> bool {
        !info.is_synthetic() && (self.include_private || !info.is_private())
    }
}
