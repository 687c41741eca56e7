//! Immutable metadata records for classes, methods and fields
//!
//! One record of each kind is created per declaration during extraction and
//! consulted read-only by the differ; no mutation paths exist. The only copy
//! operation is `clone_deprecated`, the structural clone with the deprecated
//! bit forced on that the differ uses to probe for deprecation-only changes.

use std::collections::BTreeMap;

use super::flag::access_flags::ACC_DEPRECATED;
use super::flag::AccessFlags;

/// Build the method-map key for a method: name and descriptor concatenated.
/// Overloads differ in descriptor, so they always occupy distinct keys.
pub fn method_key(name: &str, desc: &str) -> String {
    let mut key = String::with_capacity(name.len() + desc.len());
    key.push_str(name);
    key.push_str(desc);
    key
}

/// A compile-time constant attached to a field, tagged with its wire type.
///
/// The tag takes part in equality: a `0` stored as an `Int` and as a `Long`
/// are different values. Float payloads compare bitwise so equality is total.
#[derive(Debug, Clone)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl PartialEq for ConstantValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConstantValue::Int(a), ConstantValue::Int(b)) => a == b,
            (ConstantValue::Long(a), ConstantValue::Long(b)) => a == b,
            (ConstantValue::Float(a), ConstantValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ConstantValue::Double(a), ConstantValue::Double(b)) => a.to_bits() == b.to_bits(),
            (ConstantValue::Str(a), ConstantValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConstantValue {}

/// Information about one class of a library snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Class file format version word.
    pub version: u32,
    pub access: u32,
    /// Internal name, `a/b/C$Inner` form.
    pub name: String,
    pub signature: Option<String>,
    /// Internal name of the superclass; `None` only for the root class.
    pub supername: Option<String>,
    pub interfaces: Vec<String>,
    /// Declared methods keyed by [`method_key`].
    pub methods: BTreeMap<String, MethodInfo>,
    /// Declared fields keyed by field name.
    pub fields: BTreeMap<String, FieldInfo>,
}

impl ClassInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: u32,
        access: u32,
        name: impl Into<String>,
        signature: Option<String>,
        supername: Option<String>,
        interfaces: Vec<String>,
        methods: BTreeMap<String, MethodInfo>,
        fields: BTreeMap<String, FieldInfo>,
    ) -> Self {
        Self {
            version,
            access,
            name: name.into(),
            signature,
            supername,
            interfaces,
            methods,
            fields,
        }
    }

    /// Structural copy with the deprecated bit forced on.
    pub fn clone_deprecated(&self) -> Self {
        Self { access: self.access | ACC_DEPRECATED, ..self.clone() }
    }
}

/// Information about one method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Internal name of the declaring class.
    pub class_name: String,
    pub access: u32,
    pub name: String,
    /// Method descriptor, `(Ljava/lang/String;I)V` form.
    pub desc: String,
    pub signature: Option<String>,
    /// Declared checked exceptions as internal class names, where recorded.
    pub exceptions: Option<Vec<String>>,
}

impl MethodInfo {
    pub fn new(
        class_name: impl Into<String>,
        access: u32,
        name: impl Into<String>,
        desc: impl Into<String>,
        signature: Option<String>,
        exceptions: Option<Vec<String>>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            access,
            name: name.into(),
            desc: desc.into(),
            signature,
            exceptions,
        }
    }

    /// The method-map key for this method.
    pub fn key(&self) -> String {
        method_key(&self.name, &self.desc)
    }

    pub fn clone_deprecated(&self) -> Self {
        Self { access: self.access | ACC_DEPRECATED, ..self.clone() }
    }
}

/// Information about one field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Internal name of the declaring class.
    pub class_name: String,
    pub access: u32,
    pub name: String,
    /// Field type descriptor.
    pub desc: String,
    pub signature: Option<String>,
    /// Compile-time constant value, if the field carries one.
    pub value: Option<ConstantValue>,
}

impl FieldInfo {
    pub fn new(
        class_name: impl Into<String>,
        access: u32,
        name: impl Into<String>,
        desc: impl Into<String>,
        signature: Option<String>,
        value: Option<ConstantValue>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            access,
            name: name.into(),
            desc: desc.into(),
            signature,
            value,
        }
    }

    pub fn clone_deprecated(&self) -> Self {
        Self { access: self.access | ACC_DEPRECATED, ..self.clone() }
    }
}

/// Payload of a difference record: any of the three metadata kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Info {
    Class(ClassInfo),
    Method(MethodInfo),
    Field(FieldInfo),
}

impl Info {
    pub fn name(&self) -> &str {
        match self {
            Info::Class(info) => &info.name,
            Info::Method(info) => &info.name,
            Info::Field(info) => &info.name,
        }
    }

    /// Key used to order differences within a class: the method key for
    /// methods (so overloads stay distinct), the plain name otherwise.
    pub fn sort_key(&self) -> String {
        match self {
            Info::Class(info) => info.name.clone(),
            Info::Method(info) => info.key(),
            Info::Field(info) => info.name.clone(),
        }
    }
}

impl AccessFlags for ClassInfo {
    fn access(&self) -> u32 {
        self.access
    }
}

impl AccessFlags for MethodInfo {
    fn access(&self) -> u32 {
        self.access
    }
}

impl AccessFlags for FieldInfo {
    fn access(&self) -> u32 {
        self.access
    }
}

impl AccessFlags for Info {
    fn access(&self) -> u32 {
        match self {
            Info::Class(info) => info.access,
            Info::Method(info) => info.access,
            Info::Field(info) => info.access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::access_flags::{ACC_DEPRECATED, ACC_PUBLIC};

    #[test]
    fn clone_deprecated_changes_only_the_deprecated_bit() {
        let method = MethodInfo::new("a/B", ACC_PUBLIC, "run", "()V", None, None);
        let cloned = method.clone_deprecated();
        assert_eq!(cloned.access, ACC_PUBLIC | ACC_DEPRECATED);
        assert_eq!(cloned.name, method.name);
        assert_eq!(cloned.desc, method.desc);
        assert!(cloned.is_deprecated());
    }

    #[test]
    fn constant_values_compare_by_tag_and_payload() {
        assert_eq!(ConstantValue::Int(0), ConstantValue::Int(0));
        assert_ne!(ConstantValue::Int(0), ConstantValue::Long(0));
        assert_eq!(ConstantValue::Float(1.5), ConstantValue::Float(1.5));
        assert_ne!(ConstantValue::Float(1.5), ConstantValue::Double(1.5));
    }
}
