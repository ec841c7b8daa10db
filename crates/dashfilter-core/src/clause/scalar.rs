use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Scalar
///
/// Right-hand side of a comparison clause.
///
/// Derived `PartialEq` is strict structural equality. Filter identity uses
/// [`Scalar::equivalent`], which also treats date-like values as instants.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<FixedOffset>),
    List(Vec<Self>),
}

impl Scalar {
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Normalize a date-like value to epoch milliseconds.
    ///
    /// Dates map to their instant, RFC 3339 text is parsed, and integers are
    /// read as epoch milliseconds. Everything else has no instant.
    #[must_use]
    pub fn instant_millis(&self) -> Option<i64> {
        match self {
            Self::Date(date) => Some(date.timestamp_millis()),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|date| date.timestamp_millis()),
            Self::Int(millis) => Some(*millis),
            _ => None,
        }
    }

    /// Value equality used for filter identity.
    ///
    /// If either side is a date, both sides compare by instant; a side without
    /// an instant is unequal. NaN equals NaN so the relation stays reflexive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn equivalent(&self, other: &Self) -> bool {
        if self.is_date() || other.is_date() {
            return match (self.instant_millis(), other.instant_millis()) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            };
        }

        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Self::Int(int), Self::Float(float)) | (Self::Float(float), Self::Int(int)) => {
                int_equals_float(*int, *float)
            }
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left.iter().zip(right).all(|(l, r)| l.equivalent(r))
            }
            _ => false,
        }
    }
}

// Exact: the float must be integral and inside the i64 range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn int_equals_float(int: i64, float: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_scalar_from! {
    bool => Bool,
    i64 => Int,
    f64 => Float,
    String => Text,
    DateTime<FixedOffset> => Date,
    Vec<Scalar> => List,
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i32> for Scalar {
    fn from(int: i32) -> Self {
        Self::Int(i64::from(int))
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date.fixed_offset())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Date(value) => f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}
