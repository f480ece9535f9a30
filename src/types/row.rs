//! Flat bronze rows and the builder the flatteners use to produce them.

use crate::types::document::Lineage;
use crate::types::payload::QuantitativeValue;
use crate::types::schema::{COL_CAPTURED_AT, COL_CATEGORY, COL_IDENTIFIER, COL_LOGICAL_TIME};
use chrono::NaiveDateTime;
use serde_json::Value;

/// A single scalar cell of a flattened row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    /// A structured value kept whole (grid layers, zone lists, polygon coordinates).
    Json(Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            other => FieldValue::Json(other),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One bronze row: the lineage quadruple of its source document followed by
/// the category specific fields, in table column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub lineage: Lineage,
    fields: Vec<(String, FieldValue)>,
}

impl FlatRow {
    /// Number of cells including the four lineage cells.
    pub fn arity(&self) -> usize {
        4 + self.fields.len()
    }

    /// Looks a cell up by column name; lineage columns included.
    pub fn get(&self, column: &str) -> Option<FieldValue> {
        match column {
            COL_CAPTURED_AT => Some(self.lineage.captured_at.into()),
            COL_CATEGORY => Some(self.lineage.category.as_str().into()),
            COL_IDENTIFIER => Some(self.lineage.identifier.as_str().into()),
            COL_LOGICAL_TIME => Some(self.lineage.logical_time.into()),
            _ => self
                .fields
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.clone()),
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        [COL_CAPTURED_AT, COL_CATEGORY, COL_IDENTIFIER, COL_LOGICAL_TIME]
            .into_iter()
            .chain(self.fields.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    /// All cells in column order, lineage first.
    pub fn values(&self) -> impl Iterator<Item = FieldValue> + '_ {
        [
            FieldValue::Timestamp(self.lineage.captured_at),
            FieldValue::Text(self.lineage.category.clone()),
            FieldValue::Text(self.lineage.identifier.clone()),
            FieldValue::Timestamp(self.lineage.logical_time),
        ]
        .into_iter()
        .chain(self.fields.iter().map(|(_, value)| value.clone()))
    }
}

/// Accumulates the fields of a row. Cloning a partially filled builder is how
/// document-level fields are shared by every expanded element row.
#[derive(Debug, Clone)]
pub(crate) struct RowBuilder {
    lineage: Lineage,
    fields: Vec<(String, FieldValue)>,
}

impl RowBuilder {
    pub(crate) fn new(lineage: Lineage) -> Self {
        Self {
            lineage,
            fields: Vec::new(),
        }
    }

    pub(crate) fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Decomposes a `{value, unitCode}` sub-object into `<name>_value` and `<name>_unitCode`.
    pub(crate) fn quantity(self, name: &str, quantity: Option<&QuantitativeValue>) -> Self {
        let value = quantity.and_then(|q| q.value);
        let unit_code = quantity.and_then(|q| q.unit_code.clone());
        self.field(&format!("{name}_value"), value)
            .field(&format!("{name}_unitCode"), unit_code)
    }

    pub(crate) fn build(self) -> FlatRow {
        FlatRow {
            lineage: self.lineage,
            fields: self.fields,
        }
    }
}
