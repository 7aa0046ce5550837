//! Violations reported by the rule engine

use std::fmt;

/// Which rule or constraint a violation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    ExclusiveOr,
    ConditionalMandatory,
    AtLeastOne,
    SpatialId,
    ZoomRange,
    AreaBound,
    PolygonArea,
    MinimumVertices,
    Positive,
    Date,
    Timestamp,
    Decimal,
    Length,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ViolationKind::ExclusiveOr => "exactly one of the fields must be set",
            ViolationKind::ConditionalMandatory => "field is required by another field",
            ViolationKind::AtLeastOne => "at least one field must be set",
            ViolationKind::SpatialId => "invalid spatial id",
            ViolationKind::ZoomRange => "zoom level out of range",
            ViolationKind::AreaBound => "spatial ids cover too large an area",
            ViolationKind::PolygonArea => "polygon area exceeds the limit",
            ViolationKind::MinimumVertices => "polygon needs at least three vertices",
            ViolationKind::Positive => "value must be positive",
            ViolationKind::Date => "invalid date",
            ViolationKind::Timestamp => "invalid timestamp",
            ViolationKind::Decimal => "invalid number",
            ViolationKind::Length => "invalid length",
        };
        f.write_str(text)
    }
}

/// A field named by a violation, with the value it held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub name: String,
    pub value: String,
}

/// One broken rule and every field it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub fields: Vec<RejectedField>,
}

/// All violations found for one request, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSet {
    violations: Vec<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Every rejected field across all violations, in order
    pub fn rejected_fields(&self) -> impl Iterator<Item = &RejectedField> {
        self.violations.iter().flat_map(|v| v.fields.iter())
    }

    /// Whether any violation names `field`
    pub fn names_field(&self, field: &str) -> bool {
        self.rejected_fields().any(|f| f.name == field)
    }

    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    pub(crate) fn extend(&mut self, other: ViolationSet) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
