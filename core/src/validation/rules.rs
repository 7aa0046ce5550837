//! Declarative rules over named request fields.
//!
//! Cross-field rules ([`FieldRule`]) and per-field constraints
//! ([`FieldConstraint`]) are grouped into ordered stages by a [`RuleSet`].
//! Every rule of a stage is evaluated; later stages only run when all
//! earlier ones passed.

use std::fmt;
use std::marker::PhantomData;

use sid_shared::validators;
use thiserror::Error;

use super::field::{FieldAccess, FieldValue};
use super::spatial_id::{self, SpatialId, ZoomRule};
use super::violation::{RejectedField, Violation, ViolationKind, ViolationSet};
use crate::errors::{ApiError, ApiResult};

/// Fields an `AtLeastOne` rule looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// Every field the target type declares
    All,
    Named(Vec<String>),
}

/// Rule relating two or more fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Exactly one of the two fields is populated
    ExclusiveOr { first: String, second: String },
    /// `mandatory` must be populated whenever `condition` is
    ConditionalMandatory { condition: String, mandatory: String },
    /// At least one selected field is populated
    AtLeastOne(FieldSelection),
}

impl FieldRule {
    pub fn exclusive_or(first: impl Into<String>, second: impl Into<String>) -> Self {
        FieldRule::ExclusiveOr {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn conditional_mandatory(
        condition: impl Into<String>,
        mandatory: impl Into<String>,
    ) -> Self {
        FieldRule::ConditionalMandatory {
            condition: condition.into(),
            mandatory: mandatory.into(),
        }
    }

    /// At least one of all declared fields
    pub fn at_least_one() -> Self {
        FieldRule::AtLeastOne(FieldSelection::All)
    }

    pub fn at_least_one_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldRule::AtLeastOne(FieldSelection::Named(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    fn referenced_fields(&self) -> Vec<&str> {
        match self {
            FieldRule::ExclusiveOr { first, second } => vec![first.as_str(), second.as_str()],
            FieldRule::ConditionalMandatory {
                condition,
                mandatory,
            } => vec![condition.as_str(), mandatory.as_str()],
            FieldRule::AtLeastOne(FieldSelection::All) => Vec::new(),
            FieldRule::AtLeastOne(FieldSelection::Named(names)) => {
                names.iter().map(String::as_str).collect()
            }
        }
    }

    fn kind(&self) -> ViolationKind {
        match self {
            FieldRule::ExclusiveOr { .. } => ViolationKind::ExclusiveOr,
            FieldRule::ConditionalMandatory { .. } => ViolationKind::ConditionalMandatory,
            FieldRule::AtLeastOne(_) => ViolationKind::AtLeastOne,
        }
    }

    /// Names of the fields that break this rule, or `None` when it holds
    fn offending_fields<'n, T>(&'n self, target: &T) -> Option<Vec<&'n str>>
    where
        T: FieldAccess + ?Sized,
    {
        let empty = |name: &str| target.field_or_null(name).is_empty();

        match self {
            FieldRule::ExclusiveOr { first, second } => {
                (empty(first.as_str()) == empty(second.as_str()))
                    .then(|| vec![first.as_str(), second.as_str()])
            }
            FieldRule::ConditionalMandatory {
                condition,
                mandatory,
            } => (!empty(condition.as_str()) && empty(mandatory.as_str()))
                .then(|| vec![condition.as_str(), mandatory.as_str()]),
            FieldRule::AtLeastOne(selection) => {
                let names: Vec<&str> = match selection {
                    FieldSelection::All => T::FIELD_NAMES.to_vec(),
                    FieldSelection::Named(names) => names.iter().map(String::as_str).collect(),
                };
                names.iter().all(|&name| empty(name)).then_some(names)
            }
        }
    }
}

/// Constraint on the value of a single field
///
/// Scalar constraints apply to each element when the field is a list;
/// `AreaBound` and `MinimumVertices` look at the list as a whole.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraint {
    SpatialId(ZoomRule),
    ZoomRange { lower: u32, upper: u32 },
    AreaBound { lower: u32, upper: u32 },
    PolygonArea { limit: i64 },
    MinimumVertices,
    Positive,
    Date {
        format: String,
        allow_null: bool,
        allow_empty: bool,
    },
    Timestamp,
    Decimal,
    Length { min: usize, max: usize },
}

impl FieldConstraint {
    /// Strict calendar date in `format`; null and empty are rejected
    pub fn date(format: impl Into<String>) -> Self {
        FieldConstraint::Date {
            format: format.into(),
            allow_null: false,
            allow_empty: false,
        }
    }

    pub fn kind(&self) -> ViolationKind {
        match self {
            FieldConstraint::SpatialId(_) => ViolationKind::SpatialId,
            FieldConstraint::ZoomRange { .. } => ViolationKind::ZoomRange,
            FieldConstraint::AreaBound { .. } => ViolationKind::AreaBound,
            FieldConstraint::PolygonArea { .. } => ViolationKind::PolygonArea,
            FieldConstraint::MinimumVertices => ViolationKind::MinimumVertices,
            FieldConstraint::Positive => ViolationKind::Positive,
            FieldConstraint::Date { .. } => ViolationKind::Date,
            FieldConstraint::Timestamp => ViolationKind::Timestamp,
            FieldConstraint::Decimal => ViolationKind::Decimal,
            FieldConstraint::Length { .. } => ViolationKind::Length,
        }
    }

    /// Whether `value` satisfies the constraint
    pub fn check(&self, value: &FieldValue<'_>) -> bool {
        match self {
            FieldConstraint::AreaBound { lower, upper } => match value {
                FieldValue::Null => true,
                FieldValue::Text(s) => spatial_id::check_area_bound([*s], *lower, *upper),
                FieldValue::List(items) => spatial_id::check_area_bound(
                    items.iter().filter_map(FieldValue::as_text),
                    *lower,
                    *upper,
                ),
                _ => false,
            },
            FieldConstraint::MinimumVertices => match value {
                FieldValue::Null => true,
                FieldValue::List(items) => {
                    spatial_id::check_minimum_vertices(Some(items.as_slice()))
                }
                _ => false,
            },
            FieldConstraint::Date {
                allow_null,
                allow_empty,
                ..
            } => match value {
                FieldValue::Null => *allow_null,
                FieldValue::Text("") => *allow_empty,
                FieldValue::List(items) => items.iter().all(|item| self.check(item)),
                other => self.check_scalar(other),
            },
            _ => match value {
                FieldValue::Null => true,
                FieldValue::List(items) => items.iter().all(|item| self.check(item)),
                other => self.check_scalar(other),
            },
        }
    }

    fn check_scalar(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (FieldConstraint::SpatialId(rule), FieldValue::Text(s)) => {
                SpatialId::parse(s, *rule).is_ok()
            }
            (FieldConstraint::ZoomRange { lower, upper }, FieldValue::Text(s)) => {
                // Unreadable zooms are the shape constraint's concern
                spatial_id::zoom_of(s).map_or(true, |zoom| *lower <= zoom && zoom <= *upper)
            }
            (FieldConstraint::PolygonArea { limit }, FieldValue::Text(s)) => s
                .parse::<f64>()
                .map_or(false, |area| spatial_id::check_polygon_area(Some(area), *limit)),
            (FieldConstraint::PolygonArea { limit }, number) => number
                .as_f64()
                .map_or(false, |area| spatial_id::check_polygon_area(Some(area), *limit)),
            (FieldConstraint::Positive, FieldValue::Integer(n)) => *n > 0,
            (FieldConstraint::Positive, FieldValue::Float(f)) => *f > 0.0 && f.fract() == 0.0,
            (FieldConstraint::Date { format, .. }, FieldValue::Text(s)) => {
                validators::is_strict_date(s, format)
            }
            (FieldConstraint::Timestamp, FieldValue::Text(s)) => validators::is_timestamp(s),
            (FieldConstraint::Decimal, FieldValue::Text(s)) => validators::is_decimal(s),
            (FieldConstraint::Decimal, FieldValue::Integer(_) | FieldValue::Float(_)) => true,
            (FieldConstraint::Length { min, max }, FieldValue::Text(s)) => {
                validators::length_between(s, *min, *max)
            }
            _ => false,
        }
    }

    /// Whether a list value is checked one element at a time
    fn is_element_wise(&self) -> bool {
        !matches!(
            self,
            FieldConstraint::AreaBound { .. } | FieldConstraint::MinimumVertices
        )
    }

    fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            FieldConstraint::ZoomRange { lower, upper }
            | FieldConstraint::AreaBound { lower, upper } => {
                Some((*lower as usize, *upper as usize))
            }
            FieldConstraint::Length { min, max } => Some((*min, *max)),
            _ => None,
        }
    }
}

/// Evaluate cross-field rules against `target`, reporting every violation
///
/// Names the target does not declare read as null.
pub fn evaluate<T>(target: &T, rules: &[FieldRule]) -> ViolationSet
where
    T: FieldAccess + ?Sized,
{
    let mut violations = ViolationSet::new();
    for rule in rules {
        if let Some(names) = rule.offending_fields(target) {
            violations.push(Violation {
                kind: rule.kind(),
                fields: names
                    .into_iter()
                    .map(|name| rejected(target, name))
                    .collect(),
            });
        }
    }
    violations
}

fn rejected<T: FieldAccess + ?Sized>(target: &T, name: &str) -> RejectedField {
    RejectedField {
        name: name.to_string(),
        value: target.field_or_null(name).to_string(),
    }
}

/// Mistakes in a rule set definition, caught when it is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleConfigError {
    #[error("Field '{field}' is not declared by {target}")]
    UnknownField { field: String, target: &'static str },

    #[error("Invalid bounds on '{field}': {lower} > {upper}")]
    InvalidBounds {
        field: String,
        lower: usize,
        upper: usize,
    },

    #[error("AtLeastOne rule selects no fields")]
    EmptyFieldList,
}

#[derive(Debug, Clone, Default)]
struct Stage {
    constraints: Vec<(String, FieldConstraint)>,
    rules: Vec<FieldRule>,
}

impl Stage {
    fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.rules.is_empty()
    }

    fn evaluate<T: FieldAccess + ?Sized>(&self, target: &T) -> ViolationSet {
        let mut violations = ViolationSet::new();
        for (name, constraint) in &self.constraints {
            let value = target.field_or_null(name);
            if constraint.check(&value) {
                continue;
            }
            // Element-wise failures name the offending elements, e.g. `spatialIds[1]`
            let fields = match &value {
                FieldValue::List(items) if constraint.is_element_wise() => items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| !constraint.check(item))
                    .map(|(index, item)| RejectedField {
                        name: format!("{}[{}]", name, index),
                        value: item.to_string(),
                    })
                    .collect(),
                _ => vec![RejectedField {
                    name: name.clone(),
                    value: value.to_string(),
                }],
            };
            violations.push(Violation {
                kind: constraint.kind(),
                fields,
            });
        }
        violations.extend(evaluate(target, &self.rules));
        violations
    }
}

/// Ordered validation stages for one request type
pub struct RuleSet<T: ?Sized> {
    stages: Vec<Stage>,
    _target: PhantomData<fn(&T)>,
}

impl<T: ?Sized> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("stages", &self.stages)
            .finish()
    }
}

impl<T: FieldAccess + ?Sized> RuleSet<T> {
    pub fn builder() -> RuleSetBuilder<T> {
        RuleSetBuilder {
            stages: Vec::new(),
            current: Stage::default(),
            _target: PhantomData,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run the stages in order, stopping after the first one with violations
    pub fn evaluate(&self, target: &T) -> ViolationSet {
        for stage in &self.stages {
            let violations = stage.evaluate(target);
            if !violations.is_empty() {
                return violations;
            }
        }
        ViolationSet::new()
    }

    /// [`evaluate`](Self::evaluate) as a `ParamError`
    pub fn validate(&self, target: &T) -> ApiResult<()> {
        let violations = self.evaluate(target);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::param_error(violations))
        }
    }
}

/// Builder for [`RuleSet`]
pub struct RuleSetBuilder<T: ?Sized> {
    stages: Vec<Stage>,
    current: Stage,
    _target: PhantomData<fn(&T)>,
}

impl<T: FieldAccess + ?Sized> RuleSetBuilder<T> {
    /// Attach a constraint to the named field
    pub fn field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.current.constraints.push((name.into(), constraint));
        self
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.current.rules.push(rule);
        self
    }

    /// Close the current stage; following rules only run if it passes
    pub fn next_stage(mut self) -> Self {
        if !self.current.is_empty() {
            self.stages.push(std::mem::take(&mut self.current));
        }
        self
    }

    /// Check every referenced name against the fields `T` declares
    pub fn build(mut self) -> Result<RuleSet<T>, RuleConfigError> {
        if !self.current.is_empty() {
            self.stages.push(self.current);
        }

        for stage in &self.stages {
            for (name, constraint) in &stage.constraints {
                check_declared::<T>(name)?;
                if let Some((lower, upper)) = constraint.bounds() {
                    if lower > upper {
                        return Err(RuleConfigError::InvalidBounds {
                            field: name.clone(),
                            lower,
                            upper,
                        });
                    }
                }
            }
            for rule in &stage.rules {
                if let FieldRule::AtLeastOne(selection) = rule {
                    let selects_nothing = match selection {
                        FieldSelection::All => T::FIELD_NAMES.is_empty(),
                        FieldSelection::Named(names) => names.is_empty(),
                    };
                    if selects_nothing {
                        return Err(RuleConfigError::EmptyFieldList);
                    }
                }
                for name in rule.referenced_fields() {
                    check_declared::<T>(name)?;
                }
            }
        }

        Ok(RuleSet {
            stages: self.stages,
            _target: PhantomData,
        })
    }
}

fn check_declared<T: FieldAccess + ?Sized>(name: &str) -> Result<(), RuleConfigError> {
    if T::FIELD_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(RuleConfigError::UnknownField {
            field: name.to_string(),
            target: std::any::type_name::<T>(),
        })
    }
}
