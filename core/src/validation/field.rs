//! Named field access for request payloads.
//!
//! The rule engine never sees concrete request types. A payload implements
//! [`FieldAccess`] (usually through [`field_access!`](crate::field_access))
//! and hands out borrowed [`FieldValue`]s by wire name.

use std::fmt;

/// Borrowed view of one request field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<FieldValue<'a>>),
    /// Nested structure; never considered empty
    Object,
}

impl<'a> FieldValue<'a> {
    /// Null, empty string and empty list are empty; everything else is populated
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(*s),
            _ => None,
        }
    }

    /// Numeric view of integer and float values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Object => f.write_str("{...}"),
        }
    }
}

/// Conversion of a Rust field into a [`FieldValue`]
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: AsFieldValue> AsFieldValue for Vec<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        self.as_slice().as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for [T] {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::List(self.iter().map(AsFieldValue::as_field_value).collect())
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),*) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_field_value!(i8, i16, i32, i64, u8, u16, u32);

impl AsFieldValue for u64 {
    fn as_field_value(&self) -> FieldValue<'_> {
        i64::try_from(*self)
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Float(*self as f64))
    }
}

impl AsFieldValue for f32 {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }
}

impl AsFieldValue for f64 {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for serde_json::Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        use serde_json::Value;

        match self {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Integer)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Object),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => items.as_slice().as_field_value(),
            Value::Object(_) => FieldValue::Object,
        }
    }
}

/// Read access to the named fields of a request payload
pub trait FieldAccess {
    /// Every declared business field, by wire name
    const FIELD_NAMES: &'static [&'static str];

    /// Value of the named field; `None` when the name is not declared
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Value of the named field, treating undeclared names as null
    fn field_or_null(&self, name: &str) -> FieldValue<'_> {
        self.field(name).unwrap_or(FieldValue::Null)
    }
}

/// Implement [`FieldAccess`] by mapping wire names to struct fields.
///
/// ```
/// use sid_core::field_access;
///
/// struct SiteQuery {
///     site_id: Option<String>,
///     tags: Vec<String>,
/// }
///
/// field_access!(SiteQuery {
///     "siteId" => site_id,
///     "tags" => tags,
/// });
/// ```
#[macro_export]
macro_rules! field_access {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::validation::FieldAccess for $ty {
            const FIELD_NAMES: &'static [&'static str] = &[$($name),*];

            fn field(&self, name: &str) -> Option<$crate::validation::FieldValue<'_>> {
                match name {
                    $($name => Some($crate::validation::AsFieldValue::as_field_value(&self.$field)),)*
                    _ => None,
                }
            }
        }
    };
}
