//! The canonical diff handler: accumulate events into a [`Delta`]

use crate::classfile::{ClassInfo, FieldInfo, Info, MethodInfo};
use crate::common::{Error, Result};
use crate::semver::{Delta, Difference};

use super::handler::DiffHandler;

/// Folds every terminal differ event into the matching [`Difference`] and
/// exposes the accumulated [`Delta`].
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    differences: Vec<Difference>,
    current_class: Option<String>,
    development: bool,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the old snapshot as a pre-1.0 release; the resulting delta then
    /// refuses inference and validates any newer version.
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// The delta accumulated so far; complete once `end_diff` has fired.
    pub fn delta(&self) -> Delta {
        Delta::new(self.differences.clone(), self.development)
    }

    fn class_scope(&self) -> Result<String> {
        self.current_class
            .clone()
            .ok_or_else(|| Error::invalid_argument("member diff event outside a class scope"))
    }
}

impl DiffHandler for DeltaAccumulator {
    fn class_removed(&mut self, info: &ClassInfo) -> Result<()> {
        self.differences.push(Difference::Remove {
            class_name: info.name.clone(),
            info: Info::Class(info.clone()),
        });
        Ok(())
    }

    fn class_added(&mut self, info: &ClassInfo) -> Result<()> {
        self.differences.push(Difference::Add {
            class_name: info.name.clone(),
            info: Info::Class(info.clone()),
        });
        Ok(())
    }

    fn start_class_changed(&mut self, class_name: &str) -> Result<()> {
        self.current_class = Some(class_name.to_string());
        Ok(())
    }

    fn end_class_changed(&mut self) -> Result<()> {
        self.current_class = None;
        Ok(())
    }

    fn field_removed(&mut self, info: &FieldInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Remove {
            class_name,
            info: Info::Field(info.clone()),
        });
        Ok(())
    }

    fn method_removed(&mut self, info: &MethodInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Remove {
            class_name,
            info: Info::Method(info.clone()),
        });
        Ok(())
    }

    fn field_added(&mut self, info: &FieldInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Add {
            class_name,
            info: Info::Field(info.clone()),
        });
        Ok(())
    }

    fn method_added(&mut self, info: &MethodInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Add {
            class_name,
            info: Info::Method(info.clone()),
        });
        Ok(())
    }

    fn class_changed(&mut self, old: &ClassInfo, new: &ClassInfo) -> Result<()> {
        self.differences.push(Difference::Change {
            class_name: old.name.clone(),
            info: Info::Class(old.clone()),
            modified_info: Info::Class(new.clone()),
        });
        Ok(())
    }

    fn class_deprecated(&mut self, old: &ClassInfo, new: &ClassInfo) -> Result<()> {
        self.differences.push(Difference::Deprecate {
            class_name: old.name.clone(),
            info: Info::Class(old.clone()),
            modified_info: Info::Class(new.clone()),
        });
        Ok(())
    }

    fn field_changed(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Change {
            class_name,
            info: Info::Field(old.clone()),
            modified_info: Info::Field(new.clone()),
        });
        Ok(())
    }

    fn field_changed_compat(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::CompatChange {
            class_name,
            info: Info::Field(old.clone()),
            modified_info: Info::Field(new.clone()),
        });
        Ok(())
    }

    fn field_deprecated(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Deprecate {
            class_name,
            info: Info::Field(old.clone()),
            modified_info: Info::Field(new.clone()),
        });
        Ok(())
    }

    fn method_changed(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Change {
            class_name,
            info: Info::Method(old.clone()),
            modified_info: Info::Method(new.clone()),
        });
        Ok(())
    }

    fn method_changed_compat(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::CompatChange {
            class_name,
            info: Info::Method(old.clone()),
            modified_info: Info::Method(new.clone()),
        });
        Ok(())
    }

    fn method_deprecated(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        let class_name = self.class_scope()?;
        self.differences.push(Difference::Deprecate {
            class_name,
            info: Info::Method(old.clone()),
            modified_info: Info::Method(new.clone()),
        });
        Ok(())
    }
}
