//! InfluxQL query builder.
//!
//! Queries are built as small expression trees and rendered to text only
//! when sent. Predicates keep their structure until rendering, so the
//! `WHERE` keyword is written exactly once no matter how many conditions
//! are chained with [`WherePredicate::and`].
//!
//! ```
//! use influxdb_measure::{Expression, Select, WherePredicate};
//!
//! let filter = WherePredicate::eq("environment.machine.os", "linux")
//!     .and(WherePredicate::matches("build.number", ".+-release-.+"));
//! let query = Select::new(
//!     Expression::distinct("build.number"),
//!     Expression::Measurement("benchmarks".into()),
//!     Some(filter),
//! );
//! assert_eq!(
//!     query.render(),
//!     r#"SELECT DISTINCT("build.number") FROM "benchmarks" WHERE "environment.machine.os"='linux' AND "build.number"=~/.+-release-.+/"#
//! );
//! ```

use crate::value::FieldValue;

/// Aggregate functions usable in a SELECT list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFunction {
    /// Unique values.
    Distinct,
    /// Number of non-null values.
    Count,
    /// Arithmetic mean.
    Mean,
    /// Sum of values.
    Sum,
    /// Minimum value.
    Min,
    /// Maximum value.
    Max,
    /// Oldest value.
    First,
    /// Newest value.
    Last,
}

impl std::fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AggregateFunction::Distinct => "DISTINCT",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Mean => "MEAN",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::First => "FIRST",
            AggregateFunction::Last => "LAST",
        };
        write!(f, "{}", s)
    }
}

/// A composable, renderable query fragment.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// `*`
    All,
    /// A column reference.
    Column(String),
    /// A measurement used as a query source.
    Measurement(String),
    /// `FUNCTION("column")`
    Aggregate {
        /// Aggregate function.
        function: AggregateFunction,
        /// Aggregated column.
        column: String,
    },
    /// Comma-separated SELECT list.
    List(Vec<Expression>),
    /// A nested query, rendered in parentheses.
    Subquery(Box<Select>),
    /// A WHERE clause.
    Predicate(WherePredicate),
}

impl Expression {
    /// `DISTINCT("column")`
    pub fn distinct(column: impl Into<String>) -> Self {
        Expression::Aggregate {
            function: AggregateFunction::Distinct,
            column: column.into(),
        }
    }

    /// Render this expression as a query fragment.
    pub fn render(&self) -> String {
        match self {
            Expression::All => "*".to_string(),
            Expression::Column(name) => identifier(name),
            Expression::Measurement(name) => format!("\"{}\"", name),
            Expression::Aggregate { function, column } => format!("{}(\"{}\")", function, column),
            Expression::List(items) => items
                .iter()
                .map(Expression::render)
                .collect::<Vec<_>>()
                .join(", "),
            Expression::Subquery(select) => format!("({})", select.render()),
            Expression::Predicate(predicate) => predicate.render(),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<Select> for Expression {
    fn from(select: Select) -> Self {
        Expression::Subquery(Box::new(select))
    }
}

impl From<WherePredicate> for Expression {
    fn from(predicate: WherePredicate) -> Self {
        Expression::Predicate(predicate)
    }
}

/// A WHERE condition tree.
#[derive(Clone, Debug, PartialEq)]
pub enum WherePredicate {
    /// `"column"='value'`
    Eq {
        /// Compared column.
        column: String,
        /// Expected value.
        value: FieldValue,
    },
    /// `"column"=~/regex/`
    Match {
        /// Matched column.
        column: String,
        /// Regular expression, written verbatim.
        regex: String,
    },
    /// `left AND right`
    And(Box<WherePredicate>, Box<WherePredicate>),
}

impl WherePredicate {
    /// Equality predicate.
    pub fn eq(column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        WherePredicate::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Regular expression match predicate.
    pub fn matches(column: impl Into<String>, regex: impl Into<String>) -> Self {
        WherePredicate::Match {
            column: column.into(),
            regex: regex.into(),
        }
    }

    /// Conjunction of two predicates.
    pub fn and(self, other: WherePredicate) -> Self {
        WherePredicate::And(Box::new(self), Box::new(other))
    }

    /// Render the condition without the `WHERE` keyword.
    pub fn condition(&self) -> String {
        match self {
            WherePredicate::Eq { column, value } => {
                format!("\"{}\"='{}'", column, value.to_string().replace('\'', "\\'"))
            }
            WherePredicate::Match { column, regex } => format!("\"{}\"=~/{}/", column, regex),
            WherePredicate::And(left, right) => {
                format!("{} AND {}", left.condition(), right.condition())
            }
        }
    }

    /// Render the full `WHERE ...` clause.
    pub fn render(&self) -> String {
        format!("WHERE {}", self.condition())
    }
}

impl std::fmt::Display for WherePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// A complete `SELECT ... FROM ... [WHERE ...]` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    /// Selected expression.
    pub columns: Expression,
    /// Query source: a measurement or a subquery.
    pub from: Expression,
    /// Optional filter.
    pub filter: Option<WherePredicate>,
}

impl Select {
    /// Create a new statement.
    pub fn new(columns: Expression, from: Expression, filter: Option<WherePredicate>) -> Self {
        Self {
            columns,
            from,
            filter,
        }
    }

    /// Render the statement to InfluxQL.
    pub fn render(&self) -> String {
        let mut query = format!("SELECT {} FROM {}", self.columns.render(), self.from.render());
        if let Some(filter) = &self.filter {
            query.push(' ');
            query.push_str(&filter.render());
        }
        query
    }
}

impl std::fmt::Display for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Bare identifiers are written as-is, anything else is double-quoted.
fn identifier(name: &str) -> String {
    let mut chars = name.chars();
    let bare = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}
