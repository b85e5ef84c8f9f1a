//! Column types shared by measurements and the query builder.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::query::{Expression, Select, WherePredicate};
use crate::value::FieldValue;

/// Value kinds a Field column can be declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Signed 64-bit integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(Error::Parse {
                message: format!("Unknown value kind: {}", input),
            }),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
        };
        write!(f, "{}", s)
    }
}

/// Whether a column is a typed Field or an indexed Tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Typed payload column.
    Field(ValueKind),
    /// Indexed string column.
    Tag,
}

impl ColumnKind {
    /// The value kind stored by this column. Tags always hold strings.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ColumnKind::Field(kind) => *kind,
            ColumnKind::Tag => ValueKind::String,
        }
    }
}

/// A named, typed, optional-valued slot of a measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    measurement: String,
    kind: ColumnKind,
    value: Option<FieldValue>,
}

impl Column {
    /// Create an unset Field column.
    pub fn field(name: impl Into<String>, measurement: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            measurement: measurement.into(),
            kind: ColumnKind::Field(kind),
            value: None,
        }
    }

    /// Create an unset Tag column.
    pub fn tag(name: impl Into<String>, measurement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measurement: measurement.into(),
            kind: ColumnKind::Tag,
            value: None,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning measurement.
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns true for Tag columns.
    pub fn is_tag(&self) -> bool {
        self.kind == ColumnKind::Tag
    }

    /// Current value, if one was assigned.
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    /// Assign a value.
    ///
    /// Tags accept any value and store its string form. Fields only accept
    /// their declared kind.
    pub fn set_value(&mut self, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        match self.kind {
            ColumnKind::Tag => {
                self.value = Some(match value {
                    FieldValue::String(s) => FieldValue::String(s),
                    other => FieldValue::String(other.to_string()),
                });
            }
            ColumnKind::Field(kind) => {
                if value.kind() != kind {
                    return Err(Error::KindMismatch {
                        column: self.name.clone(),
                        expected: kind.to_string(),
                        actual: value.kind().to_string(),
                    });
                }
                self.value = Some(value);
            }
        }
        Ok(())
    }

    /// Reset the column to unset.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Render as a `name=value` line protocol pair.
    ///
    /// Returns `None` when no value was assigned; the caller decides whether
    /// that is worth a diagnostic.
    pub fn to_line_protocol(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        Some(match self.kind {
            ColumnKind::Field(_) => format!("{}={}", self.name, value.to_line_protocol()),
            ColumnKind::Tag => format!("{}={}", self.name, escape_tag_value(&value.to_string())),
        })
    }

    /// Reference this column in a SELECT list.
    pub fn to_expression(&self) -> Expression {
        Expression::Column(self.name.clone())
    }

    /// `"name"='value'` predicate.
    pub fn eq(&self, value: impl Into<FieldValue>) -> WherePredicate {
        WherePredicate::Eq {
            column: self.name.clone(),
            value: value.into(),
        }
    }

    /// `"name"=~/regex/` predicate.
    pub fn matches(&self, regex: impl Into<String>) -> WherePredicate {
        WherePredicate::Match {
            column: self.name.clone(),
            regex: regex.into(),
        }
    }

    /// `SELECT "name" FROM "measurement" WHERE ...`, usable as the source of
    /// an outer query.
    pub fn select(&self, filter: WherePredicate) -> Select {
        Select::new(
            Expression::Column(self.name.clone()),
            Expression::Measurement(self.measurement.clone()),
            Some(filter),
        )
    }
}

/// Escape a tag value: spaces, commas and equals signs get a backslash.
pub fn escape_tag_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ' ' | ',' | '=') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
