//! Todo repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over an ordered todo collection.
//! - Keep collection layout details out of the service layer.
//!
//! # Invariants
//! - Write paths must call `Todo::validate()` before mutating.
//! - Ids are unique within the collection for its whole lifetime.
//! - Listing preserves insertion order.

use crate::model::todo::{Todo, TodoId, TodoValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(TodoValidationError),
    NotFound(TodoId),
    Duplicate(TodoId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Duplicate(id) => write!(f, "todo id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::Duplicate(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Query options for listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoListQuery {
    /// Keep at most this many records from the front. `None` keeps all.
    pub limit: Option<usize>,
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    fn insert(&mut self, todo: Todo) -> RepoResult<Todo>;
    fn get(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
    fn replace(&mut self, todo: &Todo) -> RepoResult<()>;
    fn remove(&mut self, id: TodoId) -> RepoResult<Todo>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered, process-local todo storage. Lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Vec<Todo>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn insert(&mut self, todo: Todo) -> RepoResult<Todo> {
        todo.validate()?;
        if self.position(todo.id).is_some() {
            return Err(RepoError::Duplicate(todo.id));
        }

        self.todos.push(todo.clone());
        Ok(todo)
    }

    fn get(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        Ok(self.todos.iter().find(|todo| todo.id == id).cloned())
    }

    fn list(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let end = query
            .limit
            .map_or(self.todos.len(), |limit| limit.min(self.todos.len()));
        Ok(self.todos[..end].to_vec())
    }

    fn replace(&mut self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;
        let index = self.position(todo.id).ok_or(RepoError::NotFound(todo.id))?;
        self.todos[index] = todo.clone();
        Ok(())
    }

    fn remove(&mut self, id: TodoId) -> RepoResult<Todo> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        Ok(self.todos.remove(index))
    }

    fn len(&self) -> usize {
        self.todos.len()
    }
}
