//! Loosely typed passenger rows as produced by a lenient CSV parse

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column names of the passenger manifest.
pub mod col {
    pub const PASSENGER_ID: &str = "PassengerId";
    pub const SURVIVED: &str = "Survived";
    pub const PCLASS: &str = "Pclass";
    pub const NAME: &str = "Name";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const SIBSP: &str = "SibSp";
    pub const PARCH: &str = "Parch";
    pub const TICKET: &str = "Ticket";
    pub const FARE: &str = "Fare";
    pub const CABIN: &str = "Cabin";
    pub const EMBARKED: &str = "Embarked";
}

/// A single cell value after dynamic typing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

static NULL: Value = Value::Null;

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to a finite number.
    ///
    /// Null and empty text coerce to 0, booleans to 0/1, text is parsed after
    /// trimming. Unparsable or non-finite values yield `None`.
    pub fn to_number(&self) -> Option<f64> {
        let x = match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    0.0
                } else {
                    t.parse::<f64>().ok()?
                }
            }
        };
        x.is_finite().then_some(x)
    }

    /// Like [`Value::to_number`] but treats null as absent.
    pub fn to_number_non_null(&self) -> Option<f64> {
        if self.is_null() {
            None
        } else {
            self.to_number()
        }
    }

    /// Number or null, the shape repaired numeric fields take.
    pub fn number_or_null(&self) -> Value {
        self.to_number().map_or(Value::Null, Value::Number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One parsed record: named cells plus the parser's overflow bucket for
/// tokens beyond the header width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: BTreeMap<String, Value>,
    overflow: Option<Vec<String>>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Builder-style overflow setter.
    pub fn with_overflow<S: Into<String>>(mut self, extra: impl IntoIterator<Item = S>) -> Self {
        self.overflow = Some(extra.into_iter().map(Into::into).collect());
        self
    }

    /// Cell value; absent columns read as null.
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&NULL)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn overflow(&self) -> Option<&[String]> {
        self.overflow.as_deref()
    }

    pub fn set_overflow(&mut self, extra: Vec<String>) {
        self.overflow = Some(extra);
    }

    pub fn take_overflow(&mut self) -> Option<Vec<String>> {
        self.overflow.take()
    }

    /// Copy of this row without the overflow bucket.
    pub fn without_overflow(&self) -> Row {
        Row { values: self.values.clone(), overflow: None }
    }

    /// Numeric label, if the label column is present and coerces to a number.
    ///
    /// A present-but-null label coerces to 0.
    pub fn label(&self) -> Option<f64> {
        self.values.get(col::SURVIVED).and_then(Value::to_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Collapse empty strings to null and trim text.
pub fn normalize_row(row: &Row) -> Row {
    let values = row
        .values
        .iter()
        .map(|(k, v)| {
            let v = match v {
                Value::Text(s) => {
                    let t = s.trim();
                    if t.is_empty() {
                        Value::Null
                    } else {
                        Value::Text(t.to_string())
                    }
                }
                other => other.clone(),
            };
            (k.clone(), v)
        })
        .collect();
    Row { values, overflow: row.overflow.clone() }
}
