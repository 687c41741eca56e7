//! Aggregated differences and compatibility classification
//!
//! A [`Delta`] is the materialized outcome of one diff run: the set of typed
//! [`Difference`]s plus a flag marking the old snapshot as a pre-1.0 release.
//! It classifies into a [`CompatibilityType`], infers the next version from a
//! baseline, and validates a proposed version against a previous one.

use crate::classfile::Info;
use crate::common::{Error, Result};

use super::version::{Element, Version};

/// One typed API difference, carrying the id of the class it belongs to and
/// the metadata payload(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// A new visible entity appeared.
    Add { class_name: String, info: Info },
    /// A visible entity disappeared with no inherited replacement.
    Remove { class_name: String, info: Info },
    /// A binary-incompatible change.
    Change { class_name: String, info: Info, modified_info: Info },
    /// A logical but binary-compatible change.
    CompatChange { class_name: String, info: Info, modified_info: Info },
    /// Only the deprecated bit was added.
    Deprecate { class_name: String, info: Info, modified_info: Info },
}

impl Difference {
    /// Internal name of the class this difference belongs to.
    pub fn class_name(&self) -> &str {
        match self {
            Difference::Add { class_name, .. }
            | Difference::Remove { class_name, .. }
            | Difference::Change { class_name, .. }
            | Difference::CompatChange { class_name, .. }
            | Difference::Deprecate { class_name, .. } => class_name,
        }
    }

    /// The old-side payload (the only payload for adds and removes).
    pub fn info(&self) -> &Info {
        match self {
            Difference::Add { info, .. }
            | Difference::Remove { info, .. }
            | Difference::Change { info, .. }
            | Difference::CompatChange { info, .. }
            | Difference::Deprecate { info, .. } => info,
        }
    }

    /// The new-side payload, where the difference has one.
    pub fn modified_info(&self) -> Option<&Info> {
        match self {
            Difference::Add { .. } | Difference::Remove { .. } => None,
            Difference::Change { modified_info, .. }
            | Difference::CompatChange { modified_info, .. }
            | Difference::Deprecate { modified_info, .. } => Some(modified_info),
        }
    }

    fn kind_ordinal(&self) -> u8 {
        match self {
            Difference::Add { .. } => 0,
            Difference::Remove { .. } => 1,
            Difference::Change { .. } => 2,
            Difference::CompatChange { .. } => 3,
            Difference::Deprecate { .. } => 4,
        }
    }

    fn order_key(&self) -> (&str, u8, String) {
        (self.class_name(), self.kind_ordinal(), self.info().sort_key())
    }
}

/// Compatibility category of a delta, from the strongest difference present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatibilityType {
    /// Only binary-compatible changes, or nothing at all.
    BackwardCompatibleImplementer,
    /// Additions or deprecations: users keep working, implementers may not.
    BackwardCompatibleUser,
    /// Removals or binary-incompatible changes.
    NonBackwardCompatible,
}

/// Infer the next version from a baseline and a compatibility category.
pub fn infer_next_version(version: &Version, compatibility: CompatibilityType) -> Result<Version> {
    if version.is_development() {
        return Err(Error::invalid_argument(format!(
            "development version '{}' cannot be used to infer a next version",
            version
        )));
    }
    let element = match compatibility {
        CompatibilityType::NonBackwardCompatible => Element::Major,
        CompatibilityType::BackwardCompatibleUser => Element::Minor,
        CompatibilityType::BackwardCompatibleImplementer => Element::Patch,
    };
    Ok(version.next(element))
}

/// The immutable outcome of one diff run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    differences: Vec<Difference>,
    development: bool,
}

impl Delta {
    /// Build a delta from a set of differences; `development` marks the old
    /// snapshot as a pre-1.0 release.
    pub fn new(mut differences: Vec<Difference>, development: bool) -> Self {
        differences.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        Self { differences, development }
    }

    /// The differences, ordered by class id, kind and member key.
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// The strongest compatibility impact present in this delta.
    pub fn compatibility_type(&self) -> CompatibilityType {
        let mut user_visible = false;
        for difference in &self.differences {
            match difference {
                Difference::Change { .. } | Difference::Remove { .. } => {
                    return CompatibilityType::NonBackwardCompatible;
                }
                Difference::Add { .. } | Difference::Deprecate { .. } => {
                    user_visible = true;
                }
                Difference::CompatChange { .. } => {}
            }
        }
        if user_visible {
            CompatibilityType::BackwardCompatibleUser
        } else {
            CompatibilityType::BackwardCompatibleImplementer
        }
    }

    /// Infer the next version from `baseline` and this delta's category.
    pub fn infer(&self, baseline: &Version) -> Result<Version> {
        if self.development {
            return Err(Error::invalid_argument(
                "cannot infer a next version from a development snapshot",
            ));
        }
        infer_next_version(baseline, self.compatibility_type())
    }

    /// Check that `current` is an acceptable successor of `previous` given
    /// this delta. Development and pre-release baselines accept any strictly
    /// newer version; otherwise `current` must reach the version this delta
    /// infers from `previous`.
    pub fn validate(&self, previous: &Version, current: &Version) -> Result<bool> {
        if current <= previous {
            return Err(Error::invalid_argument(format!(
                "current version '{}' must be newer than previous version '{}'",
                current, previous
            )));
        }
        if self.development || previous.is_development() || previous.is_pre_release() {
            return Ok(true);
        }
        let minimum = infer_next_version(previous, self.compatibility_type())?;
        Ok(*current >= minimum)
    }
}
