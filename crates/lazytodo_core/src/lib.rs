//! Core domain logic for LazyTodo.
//! This crate is the single source of truth for todo invariants and hosts
//! the SQL toolkit walkthroughs.

pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sqlkit;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{
    CreateTodoRequest, NewTodo, Priority, Todo, TodoId, TodoUpdate, TodoValidationError,
    UpdateTodoRequest,
};
pub use repo::todo_repo::{
    InMemoryTodoRepository, RepoError, RepoResult, TodoListQuery, TodoRepository,
};
pub use service::todo_service::{TodoService, SAMPLE_TODOS};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
