//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its request shapes.
//! - Own field-level validation rules shared by every caller.
//!
//! # Invariants
//! - Every todo is identified by a stable, non-nil `TodoId`.
//! - Title and description lengths are counted in Unicode scalar values.

pub mod todo;
