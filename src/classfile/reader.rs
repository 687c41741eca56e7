//! Reader adapter turning classfile parser events into [`ClassInfo`] records
//!
//! The byte-level parser lives outside this crate; it drives a [`ClassVisitor`]
//! with one header, the declared fields and methods, and one end event per
//! class. [`ClassInfoVisitor`] is the canonical implementation, accumulating
//! the events of one class into a `ClassInfo`.

use std::collections::BTreeMap;

use crate::common::{Error, Result};

use super::info::{method_key, ClassInfo, ConstantValue, FieldInfo, MethodInfo};

/// Event contract the external classfile parser drives, one class at a time.
///
/// A well-formed event stream is `visit_header`, any number of `visit_field`
/// and `visit_method`, then `visit_end`.
pub trait ClassVisitor {
    fn visit_header(
        &mut self,
        version: u32,
        access: u32,
        name: &str,
        signature: Option<&str>,
        supername: Option<&str>,
        interfaces: &[String],
    ) -> Result<()>;

    fn visit_field(
        &mut self,
        access: u32,
        name: &str,
        desc: &str,
        signature: Option<&str>,
        value: Option<ConstantValue>,
    ) -> Result<()>;

    fn visit_method(
        &mut self,
        access: u32,
        name: &str,
        desc: &str,
        signature: Option<&str>,
        exceptions: Option<&[String]>,
    ) -> Result<()>;

    fn visit_end(&mut self) -> Result<()>;
}

#[derive(Debug)]
struct Header {
    version: u32,
    access: u32,
    name: String,
    signature: Option<String>,
    supername: Option<String>,
    interfaces: Vec<String>,
}

/// Accumulates the parser events of one class into a [`ClassInfo`].
///
/// Reusable across classes: `visit_end` closes the current class and makes it
/// available through [`class_info`](Self::class_info) /
/// [`take_class_info`](Self::take_class_info), after which the next
/// `visit_header` starts a fresh one. Holds per-class mutable state, so use
/// one instance per concurrent parse.
#[derive(Debug, Default)]
pub struct ClassInfoVisitor {
    header: Option<Header>,
    methods: BTreeMap<String, MethodInfo>,
    fields: BTreeMap<String, FieldInfo>,
    finished: Option<ClassInfo>,
}

impl ClassInfoVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial or finished state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The most recently completed class, if any.
    pub fn class_info(&self) -> Option<&ClassInfo> {
        self.finished.as_ref()
    }

    /// Take ownership of the most recently completed class.
    pub fn take_class_info(&mut self) -> Option<ClassInfo> {
        self.finished.take()
    }

    fn open_header(&self) -> Result<&Header> {
        self.header
            .as_ref()
            .ok_or_else(|| Error::malformed_class("member event before the class header"))
    }
}

impl ClassVisitor for ClassInfoVisitor {
    fn visit_header(
        &mut self,
        version: u32,
        access: u32,
        name: &str,
        signature: Option<&str>,
        supername: Option<&str>,
        interfaces: &[String],
    ) -> Result<()> {
        if let Some(open) = &self.header {
            return Err(Error::malformed_class(format!(
                "header event while class '{}' is still open",
                open.name
            )));
        }
        if name.is_empty() {
            return Err(Error::invalid_argument("empty class name"));
        }
        self.finished = None;
        self.header = Some(Header {
            version,
            access,
            name: name.to_string(),
            signature: signature.map(str::to_string),
            supername: supername.map(str::to_string),
            interfaces: interfaces.to_vec(),
        });
        Ok(())
    }

    fn visit_field(
        &mut self,
        access: u32,
        name: &str,
        desc: &str,
        signature: Option<&str>,
        value: Option<ConstantValue>,
    ) -> Result<()> {
        let class_name = self.open_header()?.name.clone();
        if name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "empty field name in class '{}'",
                class_name
            )));
        }
        if desc.is_empty() {
            return Err(Error::invalid_argument(format!(
                "empty descriptor for field '{}' in class '{}'",
                name, class_name
            )));
        }
        let info = FieldInfo::new(
            class_name.clone(),
            access,
            name,
            desc,
            signature.map(str::to_string),
            value,
        );
        if self.fields.insert(name.to_string(), info).is_some() {
            return Err(Error::malformed_class(format!(
                "duplicate field '{}' in class '{}'",
                name, class_name
            )));
        }
        Ok(())
    }

    fn visit_method(
        &mut self,
        access: u32,
        name: &str,
        desc: &str,
        signature: Option<&str>,
        exceptions: Option<&[String]>,
    ) -> Result<()> {
        let class_name = self.open_header()?.name.clone();
        if name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "empty method name in class '{}'",
                class_name
            )));
        }
        if !desc.starts_with('(') || !desc.contains(')') {
            return Err(Error::invalid_argument(format!(
                "malformed descriptor '{}' for method '{}' in class '{}'",
                desc, name, class_name
            )));
        }
        let key = method_key(name, desc);
        let info = MethodInfo::new(
            class_name.clone(),
            access,
            name,
            desc,
            signature.map(str::to_string),
            exceptions.map(<[String]>::to_vec),
        );
        if self.methods.insert(key.clone(), info).is_some() {
            return Err(Error::malformed_class(format!(
                "duplicate method '{}' in class '{}'",
                key, class_name
            )));
        }
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        let header = self
            .header
            .take()
            .ok_or_else(|| Error::malformed_class("end event before the class header"))?;
        let methods = std::mem::take(&mut self.methods);
        let fields = std::mem::take(&mut self.fields);
        self.finished = Some(ClassInfo::new(
            header.version,
            header.access,
            header.name,
            header.signature,
            header.supername,
            header.interfaces,
            methods,
            fields,
        ));
        Ok(())
    }
}
