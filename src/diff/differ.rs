//! Two-snapshot differ
//!
//! Compares two maps of class metadata under a [`DiffCriteria`] policy and
//! pushes the resulting event stream into a [`DiffHandler`]. Output is fully
//! deterministic: classes are visited in sorted id order, fields before
//! methods, members in sorted key order, and the removed, added and changed
//! buckets are always emitted in that order per class.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::classfile::{AccessFlags, ClassInfo, FieldInfo, MethodInfo};
use crate::common::Result;

use super::criteria::DiffCriteria;
use super::handler::DiffHandler;

/// Diff `old_classes` against `new_classes`, emitting events into `handler`.
pub fn diff<H, C>(
    handler: &mut H,
    criteria: &C,
    old_label: &str,
    new_label: &str,
    old_classes: &BTreeMap<String, ClassInfo>,
    new_classes: &BTreeMap<String, ClassInfo>,
) -> Result<()>
where
    H: DiffHandler + ?Sized,
    C: DiffCriteria + ?Sized,
{
    handler.start_diff(old_label, new_label)?;

    handler.start_old_contents()?;
    for info in old_classes.values() {
        if criteria.valid_class(info) {
            handler.contains(info)?;
        }
    }
    handler.end_old_contents()?;

    handler.start_new_contents()?;
    for info in new_classes.values() {
        if criteria.valid_class(info) {
            handler.contains(info)?;
        }
    }
    handler.end_new_contents()?;

    handler.start_removed()?;
    for (name, info) in old_classes {
        if !new_classes.contains_key(name) && criteria.valid_class(info) {
            handler.class_removed(info)?;
        }
    }
    handler.end_removed()?;

    handler.start_added()?;
    for (name, info) in new_classes {
        if !old_classes.contains_key(name) && criteria.valid_class(info) {
            handler.class_added(info)?;
        }
    }
    handler.end_added()?;

    handler.start_changed()?;
    for (name, old_info) in old_classes {
        let new_info = match new_classes.get(name) {
            Some(info) => info,
            None => continue,
        };
        if criteria.valid_class(old_info) || criteria.valid_class(new_info) {
            diff_class(handler, criteria, name, old_info, new_info, new_classes)?;
        }
    }
    handler.end_changed()?;

    handler.end_diff()?;
    Ok(())
}

/// Diff one class present in both snapshots.
fn diff_class<'a, H, C>(
    handler: &mut H,
    criteria: &C,
    name: &str,
    old_info: &'a ClassInfo,
    new_info: &'a ClassInfo,
    new_classes: &'a BTreeMap<String, ClassInfo>,
) -> Result<()>
where
    H: DiffHandler + ?Sized,
    C: DiffCriteria + ?Sized,
{
    // Extended-new view: the members the new class appears to offer,
    // including non-private members inherited through superclasses present in
    // the new snapshot. External superclasses end the walk; the visited set
    // keeps a cyclic supername chain from walking forever.
    let mut ext_methods: BTreeMap<&'a str, &'a MethodInfo> =
        new_info.methods.iter().map(|(key, info)| (key.as_str(), info)).collect();
    let mut ext_fields: BTreeMap<&'a str, &'a FieldInfo> =
        new_info.fields.iter().map(|(key, info)| (key.as_str(), info)).collect();
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut supername = new_info.supername.as_deref();
    while let Some(current) = supername {
        if !visited.insert(current) {
            break;
        }
        let super_info = match new_classes.get(current) {
            Some(info) => info,
            None => break,
        };
        for (key, field) in &super_info.fields {
            if !field.is_private() && !ext_fields.contains_key(key.as_str()) {
                ext_fields.insert(key, field);
            }
        }
        for (key, method) in &super_info.methods {
            if !method.is_private() && !ext_methods.contains_key(key.as_str()) {
                ext_methods.insert(key, method);
            }
        }
        supername = super_info.supername.as_deref();
    }

    let mut removed_methods: BTreeSet<&str> = old_info
        .methods
        .iter()
        .filter(|(_, info)| criteria.valid_method(info))
        .map(|(key, _)| key.as_str())
        .collect();
    let mut removed_fields: BTreeSet<&str> = old_info
        .fields
        .iter()
        .filter(|(_, info)| criteria.valid_field(info))
        .map(|(key, _)| key.as_str())
        .collect();
    let mut added_methods: BTreeSet<&str> = new_info
        .methods
        .iter()
        .filter(|(_, info)| criteria.valid_method(info))
        .map(|(key, _)| key.as_str())
        .collect();
    let mut added_fields: BTreeSet<&str> = new_info
        .fields
        .iter()
        .filter(|(_, info)| criteria.valid_field(info))
        .map(|(key, _)| key.as_str())
        .collect();

    // The changed candidates intersect the old visible members with the new
    // class's own keys (not the extended view), so a member that no longer
    // passes the visibility filter still shows up as changed rather than
    // silently vanishing.
    let mut changed_methods: BTreeSet<&str> = removed_methods
        .iter()
        .copied()
        .filter(|key| new_info.methods.contains_key(*key))
        .collect();
    let mut changed_fields: BTreeSet<&str> = removed_fields
        .iter()
        .copied()
        .filter(|key| new_info.fields.contains_key(*key))
        .collect();

    // Inherited-member reconciliation: a member gone from the class itself
    // but still reachable through the new inheritance chain is not removed.
    removed_methods.retain(|key| !changed_methods.contains(key) && !ext_methods.contains_key(key));
    removed_fields.retain(|key| !changed_fields.contains(key) && !ext_fields.contains_key(key));
    added_methods.retain(|key| !changed_methods.contains(key));
    added_fields.retain(|key| !changed_fields.contains(key));

    changed_methods
        .retain(|key| criteria.method_differs(&old_info.methods[*key], &new_info.methods[*key]));
    changed_fields
        .retain(|key| criteria.field_differs(&old_info.fields[*key], &new_info.fields[*key]));

    let class_changed = criteria.class_differs(old_info, new_info);
    if !class_changed
        && removed_methods.is_empty()
        && removed_fields.is_empty()
        && added_methods.is_empty()
        && added_fields.is_empty()
        && changed_methods.is_empty()
        && changed_fields.is_empty()
    {
        return Ok(());
    }

    handler.start_class_changed(name)?;

    handler.start_removed()?;
    for key in &removed_fields {
        handler.field_removed(&old_info.fields[*key])?;
    }
    for key in &removed_methods {
        handler.method_removed(&old_info.methods[*key])?;
    }
    handler.end_removed()?;

    handler.start_added()?;
    for key in &added_fields {
        handler.field_added(&new_info.fields[*key])?;
    }
    for key in &added_methods {
        handler.method_added(&new_info.methods[*key])?;
    }
    handler.end_added()?;

    handler.start_changed()?;
    if class_changed {
        if was_deprecated(old_info, new_info)
            && !criteria.class_differs(&old_info.clone_deprecated(), new_info)
        {
            handler.class_deprecated(old_info, new_info)?;
        } else {
            handler.class_changed(old_info, new_info)?;
        }
    }
    for key in &changed_fields {
        let old = &old_info.fields[*key];
        let new = &new_info.fields[*key];
        if was_deprecated(old, new) && !criteria.field_differs(&old.clone_deprecated(), new) {
            handler.field_deprecated(old, new)?;
        } else if !criteria.field_differs_binary(old, new) {
            handler.field_changed_compat(old, new)?;
        } else {
            handler.field_changed(old, new)?;
        }
    }
    for key in &changed_methods {
        let old = &old_info.methods[*key];
        let new = &new_info.methods[*key];
        if was_deprecated(old, new) && !criteria.method_differs(&old.clone_deprecated(), new) {
            handler.method_deprecated(old, new)?;
        } else if !criteria.method_differs_binary(old, new) {
            handler.method_changed_compat(old, new)?;
        } else {
            handler.method_changed(old, new)?;
        }
    }
    handler.end_changed()?;

    handler.end_class_changed()?;
    Ok(())
}

/// The deprecated bit went from unset to set; the cheap precondition for the
/// clone-with-deprecated probe.
fn was_deprecated<I: AccessFlags>(old: &I, new: &I) -> bool {
    !old.is_deprecated() && new.is_deprecated()
}
