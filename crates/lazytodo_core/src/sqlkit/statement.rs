//! Statement builders and SQL rendering.

use super::expr::{ColumnRef, Predicate, SelectItem};
use super::schema::Table;
use super::{quote_ident, SqlError, SqlResult, Value};

/// Rendered SQL text plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Anything that renders to a single SQL statement.
pub trait Statement {
    fn compile(&self) -> SqlResult<CompiledSql>;
}

fn check_columns<'a>(
    table: &Table,
    names: impl IntoIterator<Item = &'a String>,
) -> SqlResult<()> {
    for name in names {
        table.c(name)?;
    }
    Ok(())
}

type RowValues = Vec<(String, Value)>;

fn collect_row<K: Into<String>>(row: impl IntoIterator<Item = (K, Value)>) -> RowValues {
    row.into_iter().map(|(key, value)| (key.into(), value)).collect()
}

/// `INSERT INTO ... VALUES (...), (...)`.
///
/// Columns are emitted in table order. A column appears when any row sets it
/// or when it declares a default; rows that omit it get the default (generated
/// per row) or `NULL`.
#[derive(Debug, Clone)]
pub struct Insert {
    table: Table,
    rows: Vec<RowValues>,
}

impl Insert {
    pub(crate) fn new(table: Table) -> Self {
        Self {
            table,
            rows: Vec::new(),
        }
    }

    /// Adds one row.
    pub fn values<K: Into<String>>(mut self, row: impl IntoIterator<Item = (K, Value)>) -> Self {
        self.rows.push(collect_row(row));
        self
    }

    /// Adds many rows at once.
    pub fn values_many<K, R>(mut self, rows: impl IntoIterator<Item = R>) -> Self
    where
        K: Into<String>,
        R: IntoIterator<Item = (K, Value)>,
    {
        self.rows.extend(rows.into_iter().map(collect_row));
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Statement for Insert {
    fn compile(&self) -> SqlResult<CompiledSql> {
        if self.rows.is_empty() {
            return Err(SqlError::EmptyValues {
                table: self.table.name().to_string(),
            });
        }
        for row in &self.rows {
            check_columns(&self.table, row.iter().map(|(name, _)| name))?;
        }

        let columns = self
            .table
            .columns()
            .iter()
            .filter(|column| {
                column.default.is_some()
                    || self
                        .rows
                        .iter()
                        .any(|row| row.iter().any(|(name, _)| *name == column.name))
            })
            .collect::<Vec<_>>();

        let mut params = Vec::with_capacity(columns.len() * self.rows.len());
        for row in &self.rows {
            for column in &columns {
                let provided = row
                    .iter()
                    .find(|(name, _)| *name == column.name)
                    .map(|(_, value)| value.clone());
                let value = match (provided, column.default) {
                    (Some(value), _) => value,
                    (None, Some(default)) => default.generate(),
                    (None, None) => Value::Null,
                };
                params.push(value);
            }
        }

        let column_list = columns
            .iter()
            .map(|column| quote_ident(&column.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
        let rows = vec![placeholders; self.rows.len()].join(", ");

        Ok(CompiledSql {
            sql: format!(
                "INSERT INTO {} ({column_list}) VALUES {rows}",
                quote_ident(self.table.name())
            ),
            params,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

/// Two tables joined on a predicate.
#[derive(Debug, Clone)]
pub struct Join {
    left: Table,
    right: Table,
    on: Predicate,
    kind: JoinKind,
}

impl Join {
    pub(crate) fn new(left: Table, right: Table, on: Predicate, kind: JoinKind) -> Self {
        Self {
            left,
            right,
            on,
            kind,
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    fn render(&self, params: &mut Vec<Value>) -> String {
        let keyword = match self.kind {
            JoinKind::Inner => "JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
        };
        format!(
            "{} {keyword} {} ON {}",
            quote_ident(self.left.name()),
            quote_ident(self.right.name()),
            self.on.render(params)
        )
    }
}

#[derive(Debug, Clone)]
enum FromClause {
    Table(Table),
    Join(Join),
}

impl FromClause {
    fn all_columns(&self) -> Vec<ColumnRef> {
        match self {
            Self::Table(table) => table.all_columns(),
            Self::Join(join) => {
                let mut columns = join.left.all_columns();
                columns.extend(join.right.all_columns());
                columns
            }
        }
    }

    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Self::Table(table) => quote_ident(table.name()),
            Self::Join(join) => join.render(params),
        }
    }
}

/// `SELECT ... FROM ... [WHERE ...] [GROUP BY ...]`.
///
/// With no explicit projection, every column of the FROM clause is selected.
#[derive(Debug, Clone)]
pub struct Select {
    from: FromClause,
    columns: Vec<SelectItem>,
    predicate: Option<Predicate>,
    group_by: Vec<ColumnRef>,
}

impl Select {
    pub(crate) fn from_table(table: Table) -> Self {
        Self {
            from: FromClause::Table(table),
            columns: Vec::new(),
            predicate: None,
            group_by: Vec::new(),
        }
    }

    /// Replaces the projection.
    pub fn with_only_columns(mut self, columns: impl IntoIterator<Item = SelectItem>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Replaces the FROM clause with a join.
    pub fn select_from(mut self, join: Join) -> Self {
        self.from = FromClause::Join(join);
        self
    }

    /// Adds a predicate; repeated calls are combined with `AND`.
    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn group_by(mut self, column: ColumnRef) -> Self {
        self.group_by.push(column);
        self
    }
}

impl Statement for Select {
    fn compile(&self) -> SqlResult<CompiledSql> {
        let mut params = Vec::new();
        let projection = if self.columns.is_empty() {
            self.from
                .all_columns()
                .iter()
                .map(ColumnRef::render)
                .collect::<Vec<_>>()
        } else {
            self.columns.iter().map(SelectItem::render).collect()
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            projection.join(", "),
            self.from.render(&mut params)
        );
        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.render(&mut params));
        }
        if !self.group_by.is_empty() {
            let group_by = self
                .group_by
                .iter()
                .map(ColumnRef::render)
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" GROUP BY ");
            sql.push_str(&group_by);
        }

        Ok(CompiledSql { sql, params })
    }
}

/// `UPDATE ... SET ... [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Update {
    table: Table,
    values: RowValues,
    predicate: Option<Predicate>,
}

impl Update {
    pub(crate) fn new(table: Table) -> Self {
        Self {
            table,
            values: Vec::new(),
            predicate: None,
        }
    }

    pub fn values<K: Into<String>>(mut self, values: impl IntoIterator<Item = (K, Value)>) -> Self {
        self.values.extend(collect_row(values));
        self
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }
}

impl Statement for Update {
    fn compile(&self) -> SqlResult<CompiledSql> {
        if self.values.is_empty() {
            return Err(SqlError::EmptyValues {
                table: self.table.name().to_string(),
            });
        }
        check_columns(&self.table, self.values.iter().map(|(name, _)| name))?;

        let mut params = Vec::new();
        let assignments = self
            .values
            .iter()
            .map(|(name, value)| {
                params.push(value.clone());
                format!("{} = ?", quote_ident(name))
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "UPDATE {} SET {assignments}",
            quote_ident(self.table.name())
        );
        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.render(&mut params));
        }

        Ok(CompiledSql { sql, params })
    }
}

/// `DELETE FROM ... [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Delete {
    table: Table,
    predicate: Option<Predicate>,
}

impl Delete {
    pub(crate) fn new(table: Table) -> Self {
        Self {
            table,
            predicate: None,
        }
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }
}

impl Statement for Delete {
    fn compile(&self) -> SqlResult<CompiledSql> {
        let mut params = Vec::new();
        let mut sql = format!("DELETE FROM {}", quote_ident(self.table.name()));
        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.render(&mut params));
        }
        Ok(CompiledSql { sql, params })
    }
}

#[cfg(test)]
mod tests {
    use crate::sqlkit::{text, Column, ColumnDefault, ColumnType, MetaData, Statement, Value};

    fn users() -> crate::sqlkit::Table {
        MetaData::new().table(
            "users",
            vec![
                Column::new("id", ColumnType::Uuid)
                    .primary_key()
                    .default(ColumnDefault::Uuid4),
                Column::new("name", ColumnType::Text).not_null(),
                Column::new("age", ColumnType::Integer),
            ],
        )
    }

    #[test]
    fn insert_generates_uuid_defaults_per_row() {
        let compiled = users()
            .insert()
            .values_many([
                vec![("name", text("Alice")), ("age", Value::Integer(28))],
                vec![("name", text("Bob")), ("age", Value::Integer(34))],
            ])
            .compile()
            .unwrap();

        assert_eq!(
            compiled.sql,
            "INSERT INTO \"users\" (\"id\", \"name\", \"age\") VALUES (?, ?, ?), (?, ?, ?)"
        );
        assert_eq!(compiled.params.len(), 6);
        assert!(matches!(compiled.params[0], Value::Text(_)));
        assert_ne!(compiled.params[0], compiled.params[3]);
        assert_eq!(compiled.params[1], text("Alice"));
    }

    #[test]
    fn update_binds_set_values_before_where_values() {
        let users = users();
        let compiled = users
            .update()
            .where_(users.c("name").unwrap().equals(text("Rajneesh")))
            .values([("name", text("Sachin"))])
            .compile()
            .unwrap();

        assert_eq!(
            compiled.sql,
            "UPDATE \"users\" SET \"name\" = ? WHERE \"users\".\"name\" = ?"
        );
        assert_eq!(compiled.params, vec![text("Sachin"), text("Rajneesh")]);
    }

    #[test]
    fn null_equality_renders_is_null() {
        let users = users();
        let compiled = users
            .delete()
            .where_(users.c("age").unwrap().equals(Value::Null))
            .compile()
            .unwrap();

        assert_eq!(
            compiled.sql,
            "DELETE FROM \"users\" WHERE \"users\".\"age\" IS NULL"
        );
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn empty_insert_and_unknown_update_column_fail() {
        let users = users();
        assert!(users.insert().compile().is_err());
        assert!(users
            .update()
            .values([("email", text("x"))])
            .compile()
            .is_err());
    }
}
