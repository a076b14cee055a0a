use polars::prelude::AnyValue;

use crate::temporal::DateTime;

/// A single typed value, or the distinct `Null` state.
///
/// Mirrors the converter traits the corpus writes over `polars::AnyValue`
/// (`AnyValueConverter`), generalized into an owned, `'static` value so it can be
/// carried across kernel boundaries without borrowing a `Series`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Timestamp(DateTime),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            Scalar::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn from_any_value(value: &AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Scalar::Null,
            AnyValue::Boolean(v) => Scalar::Bool(*v),
            AnyValue::Int64(v) => Scalar::Int64(*v),
            AnyValue::Int32(v) => Scalar::Int64(*v as i64),
            AnyValue::UInt32(v) => Scalar::Int64(*v as i64),
            AnyValue::Float64(v) => Scalar::Float64(*v),
            AnyValue::Float32(v) => Scalar::Float64(*v as f64),
            AnyValue::String(v) => Scalar::Utf8((*v).to_string()),
            AnyValue::StringOwned(v) => Scalar::Utf8(v.to_string()),
            AnyValue::Datetime(ns, _, _) => Scalar::Timestamp(DateTime::from_utc_nanos(*ns)),
            other => Scalar::Utf8(format!("{other}")),
        }
    }

    pub fn to_any_value(&self) -> AnyValue<'static> {
        match self {
            Scalar::Null => AnyValue::Null,
            Scalar::Bool(v) => AnyValue::Boolean(*v),
            Scalar::Int64(v) => AnyValue::Int64(*v),
            Scalar::Float64(v) => AnyValue::Float64(*v),
            Scalar::Utf8(v) => AnyValue::StringOwned(v.as_str().into()),
            Scalar::Timestamp(dt) => {
                AnyValue::Int64(dt.utc_nanos())
            }
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int64(v) => write!(f, "{v}"),
            Scalar::Float64(v) => write!(f, "{v}"),
            Scalar::Utf8(v) => write!(f, "{v}"),
            Scalar::Timestamp(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int64(v)
    }
}
impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float64(v)
    }
}
impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}
impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Utf8(v.to_string())
    }
}
impl From<Option<f64>> for Scalar {
    fn from(v: Option<f64>) -> Self {
        v.map(Scalar::Float64).unwrap_or(Scalar::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_a_distinct_state() {
        assert!(Scalar::Null.is_null());
        assert!(!Scalar::Int64(0).is_null());
    }

    #[test]
    fn roundtrips_through_any_value() {
        let s = Scalar::Float64(3.5);
        let any = s.to_any_value();
        assert_eq!(Scalar::from_any_value(&any), s);
    }
}
