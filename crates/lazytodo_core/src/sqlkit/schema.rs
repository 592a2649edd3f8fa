//! Table metadata: column types, constraints, defaults and DDL rendering.

use super::expr::{ColumnRef, Predicate};
use super::statement::{Delete, Insert, Join, JoinKind, Select, Update};
use super::{quote_ident, Engine, SqlError, SqlResult, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Hyphenated UUID text.
    Uuid,
    Text,
    Integer,
    Real,
}

impl ColumnType {
    fn sql_type(self) -> &'static str {
        match self {
            Self::Uuid => "CHAR(36)",
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

/// Client-side default applied by `Insert` when a row omits the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    Uuid4,
}

impl ColumnDefault {
    pub(crate) fn generate(self) -> Value {
        match self {
            Self::Uuid4 => Value::Text(Uuid::new_v4().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
    pub foreign_key: Option<ForeignKey>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            primary_key: false,
            nullable: true,
            default: None,
            foreign_key: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    fn ddl(&self) -> String {
        let mut ddl = format!("{} {}", quote_ident(&self.name), self.ty.sql_type());
        if !self.nullable {
            ddl.push_str(" NOT NULL");
        }
        if self.primary_key {
            ddl.push_str(" PRIMARY KEY");
        }
        if let Some(fk) = &self.foreign_key {
            ddl.push_str(&format!(
                " REFERENCES {}({})",
                quote_ident(&fk.table),
                quote_ident(&fk.column)
            ));
        }
        ddl
    }
}

/// Named table plus its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Resolves a column reference, failing on unknown names.
    pub fn c(&self, name: &str) -> SqlResult<ColumnRef> {
        if self.column(name).is_none() {
            return Err(SqlError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            });
        }
        Ok(ColumnRef::new(&self.name, name))
    }

    /// References to every column, in declaration order.
    pub fn all_columns(&self) -> Vec<ColumnRef> {
        self.columns
            .iter()
            .map(|column| ColumnRef::new(&self.name, &column.name))
            .collect()
    }

    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::ddl)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({columns});",
            quote_ident(&self.name)
        )
    }

    pub fn insert(&self) -> Insert {
        Insert::new(self.clone())
    }

    pub fn select(&self) -> Select {
        Select::from_table(self.clone())
    }

    pub fn update(&self) -> Update {
        Update::new(self.clone())
    }

    pub fn delete(&self) -> Delete {
        Delete::new(self.clone())
    }

    /// Inner join with `right` on `on`.
    pub fn join(&self, right: &Table, on: Predicate) -> Join {
        Join::new(self.clone(), right.clone(), on, JoinKind::Inner)
    }

    /// Left outer join with `right` on `on`.
    pub fn outerjoin(&self, right: &Table, on: Predicate) -> Join {
        Join::new(self.clone(), right.clone(), on, JoinKind::LeftOuter)
    }
}

/// Registry of tables created together.
#[derive(Debug, Clone, Default)]
pub struct MetaData {
    tables: Vec<Table>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table and returns a handle to it. A table with the same
    /// name replaces the earlier definition in place.
    pub fn table(&mut self, name: impl Into<String>, columns: Vec<Column>) -> Table {
        let table = Table::new(name, columns);
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table.clone(),
            None => self.tables.push(table.clone()),
        }
        table
    }

    pub fn get(&self, name: &str) -> SqlResult<&Table> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| SqlError::UnknownTable(name.to_string()))
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Creates every registered table that does not exist yet, in
    /// registration order, inside one transaction.
    pub fn create_all(&self, engine: &Engine) -> SqlResult<()> {
        let script = self
            .tables
            .iter()
            .map(Table::create_sql)
            .collect::<Vec<_>>()
            .join("\n");
        engine.execute_script(&format!("BEGIN;\n{script}\nCOMMIT;"))
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, ColumnDefault, ColumnType, MetaData};
    use crate::sqlkit::SqlError;

    #[test]
    fn create_sql_renders_constraints() {
        let mut meta = MetaData::new();
        let things = meta.table(
            "things",
            vec![
                Column::new("id", ColumnType::Uuid)
                    .primary_key()
                    .default(ColumnDefault::Uuid4),
                Column::new("price", ColumnType::Real).not_null(),
                Column::new("owner", ColumnType::Uuid).references("users", "id"),
            ],
        );

        assert_eq!(
            things.create_sql(),
            "CREATE TABLE IF NOT EXISTS \"things\" (\"id\" CHAR(36) NOT NULL PRIMARY KEY, \
             \"price\" REAL NOT NULL, \"owner\" CHAR(36) REFERENCES \"users\"(\"id\"));"
        );
    }

    #[test]
    fn unknown_column_reference_is_rejected() {
        let mut meta = MetaData::new();
        let users = meta.table("users", vec![Column::new("name", ColumnType::Text)]);

        let err = users.c("email").unwrap_err();
        assert!(matches!(
            err,
            SqlError::UnknownColumn { ref table, ref column } if table == "users" && column == "email"
        ));
        assert!(matches!(meta.get("nope"), Err(SqlError::UnknownTable(_))));
    }

    #[test]
    fn redefining_a_table_replaces_it() {
        let mut meta = MetaData::new();
        meta.table("users", vec![Column::new("name", ColumnType::Text)]);
        meta.table(
            "users",
            vec![
                Column::new("name", ColumnType::Text),
                Column::new("age", ColumnType::Integer),
            ],
        );

        assert_eq!(meta.tables().len(), 1);
        assert_eq!(meta.get("users").unwrap().columns().len(), 2);
    }
}
