//! Metadata + query-builder walkthrough over `users` and `things`.
//!
//! Steps, in order:
//! 1. Create both tables if absent.
//! 2. Insert, select, rename, then delete a single user.
//! 3. Bulk insert five users and ten ownerless things; print both tables.
//! 4. Hand every ownerless thing to one randomly chosen user; print again.
//! 5. Print a left outer join of user/thing names.
//! 6. Print per-owner price totals.

use super::DemoResult;
use crate::sqlkit::{
    text, Column, ColumnDefault, ColumnType, Engine, MetaData, ResultRow, SelectItem, SqlResult,
    Table, Value,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::io::Write;

const SAMPLE_USERS: &[(&str, i64)] = &[
    ("Alice", 28),
    ("Bob", 34),
    ("Charlie", 22),
    ("Diana", 27),
    ("Ethan", 30),
];

const SAMPLE_THINGS: &[(&str, f64)] = &[
    ("Laptop", 1299.99),
    ("Smartphone", 699.50),
    ("Headphones", 199.99),
    ("Monitor", 299.99),
    ("Keyboard", 89.99),
    ("Mouse", 49.99),
    ("Printer", 149.99),
    ("Tablet", 399.99),
    ("External Hard Drive", 99.99),
    ("Webcam", 59.99),
];

/// Table handles registered by `define_tables`.
#[derive(Debug, Clone)]
pub struct Tables {
    pub users: Table,
    pub things: Table,
}

/// Result sets captured while the walkthrough runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderReport {
    /// Rows matching the single inserted user, before rename/delete.
    pub single_user: Vec<ResultRow>,
    /// `users` after the ownership update.
    pub users: Vec<ResultRow>,
    /// `things` after the ownership update.
    pub things: Vec<ResultRow>,
    /// Owner chosen for previously ownerless things.
    pub chosen_owner: Option<Value>,
    /// `(user name, thing name)` from the left outer join.
    pub ownership: Vec<ResultRow>,
    /// `(owner, sum(price))` grouped by owner.
    pub totals: Vec<ResultRow>,
}

/// Registers `users` and `things` on `meta`.
pub fn define_tables(meta: &mut MetaData) -> Tables {
    let users = meta.table(
        "users",
        vec![
            Column::new("id", ColumnType::Uuid)
                .primary_key()
                .default(ColumnDefault::Uuid4),
            Column::new("name", ColumnType::Text).not_null(),
            Column::new("age", ColumnType::Integer),
        ],
    );
    let things = meta.table(
        "things",
        vec![
            Column::new("id", ColumnType::Uuid)
                .primary_key()
                .default(ColumnDefault::Uuid4),
            Column::new("name", ColumnType::Text).not_null(),
            Column::new("price", ColumnType::Real).not_null(),
            Column::new("owner", ColumnType::Uuid).references("users", "id"),
        ],
    );
    Tables { users, things }
}

/// Runs the walkthrough, printing each result set to `out`.
pub fn run<R: Rng + ?Sized>(
    engine: &Engine,
    out: &mut impl Write,
    rng: &mut R,
) -> DemoResult<BuilderReport> {
    let mut meta = MetaData::new();
    let Tables { users, things } = define_tables(&mut meta);
    meta.create_all(engine)?;

    let single_user = single_user_lifecycle(engine, &users)?;
    writeln!(out, "Single User Lookup:")?;
    print_rows(out, &single_user)?;

    engine.execute(&users.insert().values_many(SAMPLE_USERS.iter().map(
        |(name, age)| [("name", text(*name)), ("age", Value::Integer(*age))],
    )))?;
    engine.execute(&things.insert().values_many(SAMPLE_THINGS.iter().map(
        |(name, price)| [("name", text(*name)), ("price", Value::Real(*price))],
    )))?;
    print_table(engine, out, "Users", &users)?;
    print_table(engine, out, "Things", &things)?;

    let user_ids = engine
        .fetch_all(&users.select().with_only_columns([SelectItem::from(users.c("id")?)]))?
        .into_iter()
        .filter_map(|row| row.0.into_iter().next())
        .collect::<Vec<_>>();
    let chosen_owner = user_ids.choose(rng).cloned();
    if let Some(owner) = &chosen_owner {
        engine.execute(
            &things
                .update()
                .where_(things.c("owner")?.is_null())
                .values([("owner", owner.clone())]),
        )?;
    }
    let users_after = print_table(engine, out, "Users", &users)?;
    let things_after = print_table(engine, out, "Things", &things)?;

    let ownership = engine.fetch_all(
        &users
            .select()
            .with_only_columns([
                SelectItem::from(users.c("name")?),
                SelectItem::from(things.c("name")?),
            ])
            .select_from(users.outerjoin(&things, things.c("owner")?.eq_column(&users.c("id")?))),
    )?;
    writeln!(out, "Ownership:")?;
    print_rows(out, &ownership)?;

    let totals = engine.fetch_all(
        &things
            .select()
            .with_only_columns([SelectItem::from(things.c("owner")?), things.c("price")?.sum()])
            .group_by(things.c("owner")?),
    )?;
    writeln!(out, "Totals By Owner:")?;
    print_rows(out, &totals)?;

    Ok(BuilderReport {
        single_user,
        users: users_after,
        things: things_after,
        chosen_owner,
        ownership,
        totals,
    })
}

/// Inserts Rajneesh, reads him back, renames him to Sachin, then deletes
/// Sachin (age 22). The delete is scoped by name so rows from earlier runs
/// that other tables reference stay intact.
fn single_user_lifecycle(engine: &Engine, users: &Table) -> SqlResult<Vec<ResultRow>> {
    engine.execute(
        &users
            .insert()
            .values([("name", text("Rajneesh")), ("age", Value::Integer(22))]),
    )?;
    let found = engine.fetch_all(&users.select().where_(users.c("name")?.equals(text("Rajneesh"))))?;
    engine.execute(
        &users
            .update()
            .where_(users.c("name")?.equals(text("Rajneesh")))
            .values([("name", text("Sachin"))]),
    )?;
    engine.execute(
        &users
            .delete()
            .where_(users.c("name")?.equals(text("Sachin")))
            .where_(users.c("age")?.equals(Value::Integer(22))),
    )?;
    Ok(found)
}

fn print_table(
    engine: &Engine,
    out: &mut impl Write,
    label: &str,
    table: &Table,
) -> DemoResult<Vec<ResultRow>> {
    let rows = engine.fetch_all(&table.select())?;
    writeln!(out, "{label} Table Data:")?;
    print_rows(out, &rows)?;
    Ok(rows)
}

fn print_rows(out: &mut impl Write, rows: &[ResultRow]) -> std::io::Result<()> {
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}
