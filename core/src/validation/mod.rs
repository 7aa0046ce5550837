//! Request validation
//!
//! Spatial ID checks and a small rule engine over named request fields.

mod field;
mod rules;
pub mod spatial_id;
mod violation;

#[cfg(test)]
mod tests;

pub use field::{AsFieldValue, FieldAccess, FieldValue};
pub use rules::{
    evaluate, FieldConstraint, FieldRule, FieldSelection, RuleConfigError, RuleSet,
    RuleSetBuilder,
};
pub use spatial_id::{ShapeError, SpatialId, ZoomRule};
pub use violation::{RejectedField, Violation, ViolationKind, ViolationSet};
