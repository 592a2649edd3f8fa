//! SQL toolkit walkthroughs.
//!
//! # Responsibility
//! - Run the raw-SQL (`basics`) and metadata/query-builder (`builder`)
//!   walkthroughs against a caller-provided `Engine`.
//! - Print every result set to a caller-provided writer.
//!
//! # Invariants
//! - Walkthroughs only use public `sqlkit` APIs.
//! - Randomness is injected so runs can be reproduced in tests.

use crate::sqlkit::SqlError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod basics;
pub mod builder;

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug)]
pub enum DemoError {
    Sql(SqlError),
    Output(std::io::Error),
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write walkthrough output: {err}"),
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sql(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<SqlError> for DemoError {
    fn from(value: SqlError) -> Self {
        Self::Sql(value)
    }
}

impl From<std::io::Error> for DemoError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}
