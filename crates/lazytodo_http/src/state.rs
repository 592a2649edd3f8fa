//! Shared handler state.

use lazytodo_core::{InMemoryTodoRepository, RepoResult, TodoService};
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedTodoService = Arc<RwLock<TodoService<InMemoryTodoRepository>>>;

/// State injected into every handler. Cloning shares the same collection.
#[derive(Clone)]
pub struct AppState {
    pub todos: SharedTodoService,
}

impl AppState {
    pub fn new(service: TodoService<InMemoryTodoRepository>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(service)),
        }
    }

    /// State over the six sample todos.
    pub fn seeded() -> RepoResult<Self> {
        Ok(Self::new(TodoService::seeded()?))
    }

    /// State over an empty collection.
    pub fn empty() -> Self {
        Self::new(TodoService::new(InMemoryTodoRepository::new()))
    }
}
