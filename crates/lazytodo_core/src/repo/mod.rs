//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate collection layout from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Todo::validate()` before storing.
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`).

pub mod todo_repo;
