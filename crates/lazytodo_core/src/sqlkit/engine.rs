//! Statement execution over one SQLite connection.

use super::statement::{CompiledSql, Statement};
use super::{SqlResult, Value};
use crate::db::{open_db, open_db_in_memory};
use log::{log, Level};
use rusqlite::{params_from_iter, Connection};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One fetched row, columns in projection order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow(pub Vec<Value>);

impl ResultRow {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl Display for ResultRow {
    /// Renders as a tuple, e.g. `('Alice', 28, None)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match value {
                Value::Null => f.write_str("None")?,
                Value::Integer(number) => write!(f, "{number}")?,
                Value::Real(number) => write!(f, "{number}")?,
                Value::Text(text) => write!(f, "'{text}'")?,
                Value::Blob(bytes) => write!(f, "<{} bytes>", bytes.len())?,
            }
        }
        f.write_str(")")
    }
}

/// Connection plus echo setting. With echo on, every statement is logged at
/// `info`; otherwise at `debug`.
pub struct Engine {
    conn: Connection,
    echo: bool,
}

impl Engine {
    /// Opens (creating if absent) a database file.
    pub fn open(path: impl AsRef<Path>, echo: bool) -> SqlResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
            echo,
        })
    }

    pub fn open_in_memory(echo: bool) -> SqlResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            echo,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs a write statement and returns the number of affected rows.
    pub fn execute(&self, statement: &impl Statement) -> SqlResult<usize> {
        let compiled = statement.compile()?;
        self.run(&compiled)
    }

    /// Runs a query statement and returns all rows.
    pub fn fetch_all(&self, statement: &impl Statement) -> SqlResult<Vec<ResultRow>> {
        let compiled = statement.compile()?;
        self.query(&compiled)
    }

    /// Runs one raw SQL statement without parameters.
    pub fn execute_text(&self, sql: &str) -> SqlResult<usize> {
        self.run(&CompiledSql {
            sql: sql.to_string(),
            params: Vec::new(),
        })
    }

    /// Runs a raw SQL query without parameters.
    pub fn query_text(&self, sql: &str) -> SqlResult<Vec<ResultRow>> {
        self.query(&CompiledSql {
            sql: sql.to_string(),
            params: Vec::new(),
        })
    }

    /// Runs a multi-statement script.
    pub fn execute_script(&self, script: &str) -> SqlResult<()> {
        self.echo_sql(script, &[]);
        self.conn.execute_batch(script)?;
        Ok(())
    }

    fn run(&self, compiled: &CompiledSql) -> SqlResult<usize> {
        self.echo_sql(&compiled.sql, &compiled.params);
        let changed = self
            .conn
            .execute(&compiled.sql, params_from_iter(compiled.params.iter()))?;
        Ok(changed)
    }

    fn query(&self, compiled: &CompiledSql) -> SqlResult<Vec<ResultRow>> {
        self.echo_sql(&compiled.sql, &compiled.params);
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(compiled.params.iter()))?;

        let mut fetched = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(row.get::<_, Value>(index)?);
            }
            fetched.push(ResultRow(values));
        }
        Ok(fetched)
    }

    fn echo_sql(&self, sql: &str, params: &[Value]) {
        let level = if self.echo { Level::Info } else { Level::Debug };
        log!(
            level,
            "event=sql_exec module=sqlkit sql={} params={:?}",
            sql.replace(['\n', '\r'], " "),
            params
        );
    }
}

#[cfg(test)]
mod tests {
    use super::ResultRow;
    use crate::sqlkit::{text, Value};

    #[test]
    fn result_row_renders_as_tuple() {
        let row = ResultRow(vec![
            text("Laptop"),
            Value::Real(1299.99),
            Value::Integer(3),
            Value::Null,
        ]);
        assert_eq!(row.to_string(), "('Laptop', 1299.99, 3, None)");
    }
}
