//! Terminos Library API Differ (toldiff)
//!
//! Compares two snapshots of a compiled class library and reports the
//! structured API differences that drive semantic-version inference and
//! validation: what changed in the public contract, and which version bump
//! is required.
//!
//! ## Architecture
//!
//! - **classfile**: class metadata model and the reader adapter fed by
//!   classfile parser events
//! - **diff**: pluggable diff criteria, the differ and the diff handler
//!   protocol
//! - **semver**: version arithmetic, difference aggregation and compatibility
//!   classification
//! - **common**: shared error definitions
//!
//! ## Flow
//!
//! ```text
//! .class parser events → ClassInfoVisitor → ClassInfo maps (old, new)
//!                                ↓
//!               diff(handler, criteria, …) → DiffHandler events
//!                                ↓
//!                DeltaAccumulator → Delta → classify / infer / validate
//! ```
//!
//! Unpacking archives, fetching artifacts and the byte-level classfile parser
//! are the caller's concern; the library consumes parser events and in-memory
//! class maps only.

pub mod classfile;
pub mod common;
pub mod diff;
pub mod semver;

pub use common::{Error, Result};
pub use diff::{
    DeltaAccumulator, DiffCriteria, DiffHandler, PublicDiffCriteria,
    PublicProtectedDiffCriteria, SimpleDiffCriteria,
};
pub use semver::{CompatibilityType, Delta, Difference, Version};

use std::collections::BTreeMap;

use classfile::ClassInfo;

/// Diff two class maps and accumulate the differences into a [`Delta`].
///
/// Convenience wrapper wiring a [`DeltaAccumulator`] through [`diff::diff`];
/// use the event form directly to stream into a custom handler.
pub fn compare<C>(
    criteria: &C,
    old_label: &str,
    new_label: &str,
    old_classes: &BTreeMap<String, ClassInfo>,
    new_classes: &BTreeMap<String, ClassInfo>,
) -> Result<Delta>
where
    C: DiffCriteria + ?Sized,
{
    let mut accumulator = DeltaAccumulator::new();
    diff::diff(&mut accumulator, criteria, old_label, new_label, old_classes, new_classes)?;
    Ok(accumulator.delta())
}
