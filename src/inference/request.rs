//! Record and schema types shared by the form layer and the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a column holds, as fixed when the transform was fitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Numeric => write!(f, "numeric"),
            ValueKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// One column of the fitted schema: name plus expected kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ValueKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A single user-supplied value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Category(String),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Number(_) => ValueKind::Numeric,
            FieldValue::Category(_) => ValueKind::Categorical,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Category(v) => write!(f, "{}", v),
        }
    }
}

/// One prediction attempt: ordered (column, value) pairs.
///
/// Built fresh from the form on every submit and discarded after use. The
/// pipeline rejects any request whose column set, order, or kinds deviate
/// from the fitted schema.
#[derive(Clone, Debug, Default)]
pub struct PredictionRequest {
    values: Vec<(String, FieldValue)>,
}

impl PredictionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column value, preserving insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.push((name.into(), value));
    }

    pub fn from_pairs(pairs: Vec<(String, FieldValue)>) -> Self {
        Self { values: pairs }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a column name, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_preserves_order() {
        let mut request = PredictionRequest::new();
        request.push("area", FieldValue::Number(120.0));
        request.push("type", FieldValue::Category("house".to_string()));

        let names: Vec<&str> = request.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["area", "type"]);
        assert_eq!(request.get("area"), Some(&FieldValue::Number(120.0)));
        assert_eq!(request.get("price"), None);
    }

    #[test]
    fn test_field_value_kind() {
        assert_eq!(FieldValue::Number(1.0).kind(), ValueKind::Numeric);
        assert_eq!(
            FieldValue::Category("x".to_string()).kind(),
            ValueKind::Categorical
        );
    }
}
