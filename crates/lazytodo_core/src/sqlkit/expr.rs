//! Column references, predicates and select items.

use super::{quote_ident, Value};

/// Fully qualified `table.column` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub(crate) fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// `column = ?`, or `column IS NULL` when `value` is `Value::Null`.
    pub fn equals(&self, value: impl Into<Value>) -> Predicate {
        match value.into() {
            Value::Null => Predicate::IsNull(self.clone()),
            value => Predicate::Eq(self.clone(), value),
        }
    }

    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.clone())
    }

    pub fn eq_column(&self, other: &ColumnRef) -> Predicate {
        Predicate::ColumnEq(self.clone(), other.clone())
    }

    pub fn sum(&self) -> SelectItem {
        SelectItem::Sum(self.clone())
    }

    pub(crate) fn render(&self) -> String {
        format!("{}.{}", quote_ident(&self.table), quote_ident(&self.column))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(ColumnRef, Value),
    IsNull(ColumnRef),
    ColumnEq(ColumnRef, ColumnRef),
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Appends the rendered predicate's bound values to `params`.
    pub(crate) fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Self::Eq(column, value) => {
                params.push(value.clone());
                format!("{} = ?", column.render())
            }
            Self::IsNull(column) => format!("{} IS NULL", column.render()),
            Self::ColumnEq(left, right) => format!("{} = {}", left.render(), right.render()),
            Self::And(parts) => parts
                .iter()
                .map(|part| format!("({})", part.render(params)))
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }
}

/// One projected expression of a `Select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Column(ColumnRef),
    Sum(ColumnRef),
}

impl SelectItem {
    pub(crate) fn render(&self) -> String {
        match self {
            Self::Column(column) => column.render(),
            Self::Sum(column) => format!("sum({})", column.render()),
        }
    }
}

impl From<ColumnRef> for SelectItem {
    fn from(value: ColumnRef) -> Self {
        Self::Column(value)
    }
}
