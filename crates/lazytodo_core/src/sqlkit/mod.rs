//! Small typed SQL builder over SQLite.
//!
//! # Responsibility
//! - Describe tables and columns as metadata (`Table`, `MetaData`).
//! - Build insert/select/update/delete/join/group-by statements with bound
//!   parameters instead of string-interpolated values.
//! - Execute statements through an `Engine` that optionally echoes SQL.
//!
//! # Invariants
//! - Identifiers are always double-quoted; values are always bound.
//! - Column references are resolved against table metadata before SQL is
//!   rendered; unknown names fail early with `SqlError::UnknownColumn`.
//! - UUID columns are stored as canonical hyphenated text.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod engine;
mod expr;
mod schema;
mod statement;

pub use engine::{Engine, ResultRow};
pub use expr::{ColumnRef, Predicate, SelectItem};
pub use schema::{Column, ColumnDefault, ColumnType, ForeignKey, MetaData, Table};
pub use statement::{CompiledSql, Delete, Insert, Join, JoinKind, Select, Statement, Update};

pub use rusqlite::types::Value;

pub type SqlResult<T> = Result<T, SqlError>;

#[derive(Debug)]
pub enum SqlError {
    Db(DbError),
    UnknownTable(String),
    UnknownColumn { table: String, column: String },
    EmptyValues { table: String },
}

impl Display for SqlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownTable(name) => write!(f, "unknown table `{name}`"),
            Self::UnknownColumn { table, column } => {
                write!(f, "table `{table}` has no column `{column}`")
            }
            Self::EmptyValues { table } => {
                write!(f, "statement on `{table}` has no values to write")
            }
        }
    }
}

impl Error for SqlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SqlError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SqlError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Convenience constructor for text values.
pub fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
