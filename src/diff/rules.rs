//! Helper predicates shared by the diff criteria

use std::collections::BTreeSet;

use crate::classfile::access_flags::{ACC_SUPER, ACC_SYNTHETIC};
use crate::classfile::ConstantValue;

const CLASS_ACCESS_MASK: u32 = ACC_SUPER | ACC_SYNTHETIC;

/// Class access comparison masks `ACC_SUPER` (historical noise emitted
/// inconsistently by compilers) and `ACC_SYNTHETIC` (a synthetic toggle only
/// moves the class in or out of the visible set). The deprecated bit takes
/// part: the differ's clone-with-deprecated probe relies on it to tell a
/// deprecation apart from any other access change.
pub fn is_class_access_change(old_access: u32, new_access: u32) -> bool {
    old_access & !CLASS_ACCESS_MASK != new_access & !CLASS_ACCESS_MASK
}

/// Member access comparison is plain bit inequality, so a widening such as
/// private to public counts, and so does the deprecated bit (rerouted to a
/// deprecation report by the differ's probe).
pub fn is_member_access_change(old_access: u32, new_access: u32) -> bool {
    old_access != new_access
}

/// Two throws clauses differ iff their set-valued contents differ; order and
/// duplicates are ignored, and an absent clause equals an empty one.
pub fn is_throws_clause_change(old: Option<&[String]>, new: Option<&[String]>) -> bool {
    let old: BTreeSet<&str> = old.unwrap_or_default().iter().map(String::as_str).collect();
    let new: BTreeSet<&str> = new.unwrap_or_default().iter().map(String::as_str).collect();
    old != new
}

/// Constant values differ iff either side is present and they are not equal;
/// the wire-type tag is part of the comparison.
pub fn is_field_value_change(old: Option<&ConstantValue>, new: Option<&ConstantValue>) -> bool {
    old != new
}
