//! Push protocol for diff events
//!
//! The differ drives a [`DiffHandler`] through the full event sequence of one
//! comparison: the snapshot content announcements, the removed and added
//! class blocks, and one nested block per changed class. Every method has a
//! no-op default so streaming sinks implement only the events they consume;
//! the accumulating implementation lives in [`super::DeltaAccumulator`].
//!
//! Methods return `Result<()>` so a sink writing to external media can
//! surface failures; the differ propagates them and never catches.

use crate::classfile::{ClassInfo, FieldInfo, MethodInfo};
use crate::common::Result;

#[allow(unused_variables)]
pub trait DiffHandler {
    fn start_diff(&mut self, old_label: &str, new_label: &str) -> Result<()> {
        Ok(())
    }

    fn start_old_contents(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_old_contents(&mut self) -> Result<()> {
        Ok(())
    }

    fn start_new_contents(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_new_contents(&mut self) -> Result<()> {
        Ok(())
    }

    /// A visible class contained in the snapshot currently being announced.
    fn contains(&mut self, info: &ClassInfo) -> Result<()> {
        Ok(())
    }

    fn start_removed(&mut self) -> Result<()> {
        Ok(())
    }

    fn class_removed(&mut self, info: &ClassInfo) -> Result<()> {
        Ok(())
    }

    fn end_removed(&mut self) -> Result<()> {
        Ok(())
    }

    fn start_added(&mut self) -> Result<()> {
        Ok(())
    }

    fn class_added(&mut self, info: &ClassInfo) -> Result<()> {
        Ok(())
    }

    fn end_added(&mut self) -> Result<()> {
        Ok(())
    }

    fn start_changed(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_changed(&mut self) -> Result<()> {
        Ok(())
    }

    /// Opens the nested block of one changed class; member events up to the
    /// matching [`end_class_changed`](Self::end_class_changed) belong to it.
    fn start_class_changed(&mut self, class_name: &str) -> Result<()> {
        Ok(())
    }

    fn end_class_changed(&mut self) -> Result<()> {
        Ok(())
    }

    fn field_removed(&mut self, info: &FieldInfo) -> Result<()> {
        Ok(())
    }

    fn method_removed(&mut self, info: &MethodInfo) -> Result<()> {
        Ok(())
    }

    fn field_added(&mut self, info: &FieldInfo) -> Result<()> {
        Ok(())
    }

    fn method_added(&mut self, info: &MethodInfo) -> Result<()> {
        Ok(())
    }

    fn class_changed(&mut self, old: &ClassInfo, new: &ClassInfo) -> Result<()> {
        Ok(())
    }

    /// The class changed in nothing but the deprecated bit.
    fn class_deprecated(&mut self, old: &ClassInfo, new: &ClassInfo) -> Result<()> {
        Ok(())
    }

    fn field_changed(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        Ok(())
    }

    /// The field changed logically but stays binary-compatible.
    fn field_changed_compat(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        Ok(())
    }

    fn field_deprecated(&mut self, old: &FieldInfo, new: &FieldInfo) -> Result<()> {
        Ok(())
    }

    fn method_changed(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        Ok(())
    }

    /// The method changed logically but stays binary-compatible.
    fn method_changed_compat(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        Ok(())
    }

    fn method_deprecated(&mut self, old: &MethodInfo, new: &MethodInfo) -> Result<()> {
        Ok(())
    }

    fn end_diff(&mut self) -> Result<()> {
        Ok(())
    }
}
