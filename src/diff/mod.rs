//! Diff criteria, the differ and the diff handler protocol

mod accumulator;
mod criteria;
mod differ;
mod handler;
mod rules;

pub use accumulator::DeltaAccumulator;
pub use criteria::{
    DiffCriteria, PublicDiffCriteria, PublicProtectedDiffCriteria, SimpleDiffCriteria,
};
pub use differ::diff;
pub use handler::DiffHandler;
pub use rules::{
    is_class_access_change, is_field_value_change, is_member_access_change,
    is_throws_clause_change,
};
