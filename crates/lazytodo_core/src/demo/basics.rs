//! Raw SQL walkthrough: create a table, insert one row, read it back.

use super::DemoResult;
use crate::sqlkit::{Engine, ResultRow};
use std::io::Write;

const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS users (name TEXT, age INTEGER);";
const INSERT_USER_SQL: &str = "INSERT INTO users (name, age) VALUES ('Rajneesh', 22);";
const SELECT_USERS_SQL: &str = "SELECT name, age FROM users;";

/// Creates `users(name, age)` if absent, inserts one row and prints all rows.
///
/// Returns the rows printed.
pub fn run(engine: &Engine, out: &mut impl Write) -> DemoResult<Vec<ResultRow>> {
    engine.execute_text(CREATE_USERS_SQL)?;
    engine.execute_text(INSERT_USER_SQL)?;

    let rows = engine.query_text(SELECT_USERS_SQL)?;
    writeln!(out, "Users Table Data:")?;
    for row in &rows {
        writeln!(out, "{row}")?;
    }
    Ok(rows)
}
