//! Todo use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete entry points for core callers.
//! - Delegate storage to repository implementations.
//! - Build the seeded sample collection used at server startup.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Update overwrites only fields present in the partial input.

use crate::model::todo::{NewTodo, Priority, Todo, TodoId, TodoUpdate};
use crate::repo::todo_repo::{
    InMemoryTodoRepository, RepoError, RepoResult, TodoListQuery, TodoRepository,
};
use log::debug;

/// Sample records loaded by `TodoService::seeded`, in insertion order.
pub const SAMPLE_TODOS: &[(&str, &str, Priority)] = &[
    ("Go to gym", "Go to gym at 1700", Priority::High),
    ("Buy groceries", "Milk, Bread, and Eggs", Priority::High),
    (
        "Read a book",
        "Finish reading the Python tutorial",
        Priority::High,
    ),
    (
        "Call mom",
        "Catch up with mom over the phone",
        Priority::High,
    ),
    (
        "Write a blog post",
        "Share Python tips on your blog",
        Priority::Medium,
    ),
    (
        "Plan weekend trip",
        "Organize a weekend getaway with friends",
        Priority::Low,
    ),
];

/// Use-case service wrapper for todo CRUD operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl TodoService<InMemoryTodoRepository> {
    /// Creates a service over an in-memory collection holding `SAMPLE_TODOS`.
    pub fn seeded() -> RepoResult<Self> {
        let mut service = Self::new(InMemoryTodoRepository::new());
        for (title, description, priority) in SAMPLE_TODOS {
            service.create_todo(&NewTodo::new(*title, *description, *priority))?;
        }
        Ok(service)
    }
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists todos in insertion order, truncated to `limit` when given.
    pub fn list_todos(&self, limit: Option<usize>) -> RepoResult<Vec<Todo>> {
        self.repo.list(&TodoListQuery { limit })
    }

    /// Gets one todo by id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record matches.
    pub fn get_todo(&self, id: TodoId) -> RepoResult<Todo> {
        self.repo.get(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Creates a todo with a new unique id and appends it to the collection.
    pub fn create_todo(&mut self, input: &NewTodo) -> RepoResult<Todo> {
        let todo = Todo::new(
            input.title.as_str(),
            input.description.as_str(),
            input.priority,
        )?;
        let created = self.repo.insert(todo)?;
        debug!(
            "event=todo_create module=service status=ok id={} priority={}",
            created.id, created.priority
        );
        Ok(created)
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// # Errors
    /// - `RepoError::Validation` for the first invalid present field.
    /// - `RepoError::NotFound` when no record matches.
    pub fn update_todo(&mut self, id: TodoId, update: &TodoUpdate) -> RepoResult<Todo> {
        if let Some(err) = update.violations().into_iter().next() {
            return Err(err.into());
        }

        let mut todo = self.get_todo(id)?;
        todo.apply(update);
        self.repo.replace(&todo)?;
        debug!("event=todo_update module=service status=ok id={id}");
        Ok(todo)
    }

    /// Removes a todo and returns the removed record.
    pub fn delete_todo(&mut self, id: TodoId) -> RepoResult<Todo> {
        let removed = self.repo.remove(id)?;
        debug!("event=todo_delete module=service status=ok id={id}");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}
