//! Todo record, priority levels and request payloads.
//!
//! # Responsibility
//! - Define the record stored by the todo collection.
//! - Define create/update payloads with explicit field presence.
//! - Define the request shapes that carry priority as a raw ordinal so every
//!   field violation is collected in one pass.
//! - Validate title/description length bounds.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `title` holds 3..=150 chars, `description` holds 5..=512 chars.
//! - `priority` is encoded on the wire as its ordinal (`1|2|3`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a todo record.
pub type TodoId = Uuid;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 150;
pub const DESCRIPTION_MIN_CHARS: usize = 5;
pub const DESCRIPTION_MAX_CHARS: usize = 512;

/// Ordinal urgency of a todo. Lower value means more urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    High = 1,
    Medium = 2,
    #[default]
    Low = 3,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Maps a wire ordinal of any integer width onto a level.
    pub fn from_ordinal(value: i64) -> Result<Self, TodoValidationError> {
        u8::try_from(value)
            .map_err(|_| TodoValidationError::InvalidPriority(value))
            .and_then(Self::try_from)
    }
}

impl TryFrom<u8> for Priority {
    type Error = TodoValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(TodoValidationError::InvalidPriority(i64::from(other))),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value as u8
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failure for todo payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    NilId,
    TitleTooShort { chars: usize },
    TitleTooLong { chars: usize },
    DescriptionTooShort { chars: usize },
    DescriptionTooLong { chars: usize },
    InvalidPriority(i64),
}

impl TodoValidationError {
    /// Name of the offending field as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NilId => "id",
            Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooShort { .. } | Self::DescriptionTooLong { .. } => "description",
            Self::InvalidPriority(_) => "priority",
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NilId => "uuid_nil",
            Self::TitleTooShort { .. } | Self::DescriptionTooShort { .. } => "string_too_short",
            Self::TitleTooLong { .. } | Self::DescriptionTooLong { .. } => "string_too_long",
            Self::InvalidPriority(_) => "enum",
        }
    }
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
            Self::TitleTooShort { .. } => write!(
                f,
                "String should have at least {TITLE_MIN_CHARS} characters"
            ),
            Self::TitleTooLong { .. } => write!(
                f,
                "String should have at most {TITLE_MAX_CHARS} characters"
            ),
            Self::DescriptionTooShort { .. } => write!(
                f,
                "String should have at least {DESCRIPTION_MIN_CHARS} characters"
            ),
            Self::DescriptionTooLong { .. } => write!(
                f,
                "String should have at most {DESCRIPTION_MAX_CHARS} characters"
            ),
            Self::InvalidPriority(value) => {
                write!(f, "Input should be 1, 2 or 3, got {value}")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// Checks title length bounds.
pub fn check_title(title: &str) -> Result<(), TodoValidationError> {
    let chars = title.chars().count();
    if chars < TITLE_MIN_CHARS {
        return Err(TodoValidationError::TitleTooShort { chars });
    }
    if chars > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong { chars });
    }
    Ok(())
}

/// Checks description length bounds.
pub fn check_description(description: &str) -> Result<(), TodoValidationError> {
    let chars = description.chars().count();
    if chars < DESCRIPTION_MIN_CHARS {
        return Err(TodoValidationError::DescriptionTooShort { chars });
    }
    if chars > DESCRIPTION_MAX_CHARS {
        return Err(TodoValidationError::DescriptionTooLong { chars });
    }
    Ok(())
}

/// Canonical todo record held by the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Todo {
    /// Creates a todo with a freshly generated v4 id.
    ///
    /// # Errors
    /// - Returns the first violated length bound.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TodoValidationError> {
        Self::with_id(Uuid::new_v4(), title, description, priority)
    }

    /// Creates a todo with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `NilId` for `Uuid::nil()`.
    /// - Returns the first violated length bound.
    pub fn with_id(
        id: TodoId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id,
            title: title.into(),
            description: description.into(),
            priority,
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Validates id and field bounds.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        check_title(&self.title)?;
        check_description(&self.description)?;
        Ok(())
    }

    /// Overwrites only the fields present in `update`.
    ///
    /// Does not validate; callers check `update.violations()` first.
    pub fn apply(&mut self, update: &TodoUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
    }
}

/// Create payload. `priority` defaults to `Priority::Low`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

impl NewTodo {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Returns every violated field rule, in field order.
    pub fn violations(&self) -> Vec<TodoValidationError> {
        [check_title(&self.title), check_description(&self.description)]
            .into_iter()
            .filter_map(Result::err)
            .collect()
    }
}

/// Partial update payload.
///
/// `None` means "not provided"; JSON `null` is treated the same way. Present
/// values are validated with the create rules, so an empty string is rejected
/// instead of being read as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none()
    }

    /// Returns every violated rule among present fields.
    pub fn violations(&self) -> Vec<TodoValidationError> {
        let mut violations = Vec::new();
        if let Some(Err(err)) = self.title.as_deref().map(check_title) {
            violations.push(err);
        }
        if let Some(Err(err)) = self.description.as_deref().map(check_description) {
            violations.push(err);
        }
        violations
    }
}

fn default_priority_ordinal() -> i64 {
    i64::from(u8::from(Priority::default()))
}

/// Create request as received on the wire.
///
/// `priority` stays a raw ordinal until `into_new_todo`, so a bad level is
/// reported next to any length violations instead of failing decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_priority_ordinal")]
    pub priority: i64,
}

impl CreateTodoRequest {
    /// Converts into a checked payload.
    ///
    /// # Errors
    /// - Returns every violated field rule, in field order.
    pub fn into_new_todo(self) -> Result<NewTodo, Vec<TodoValidationError>> {
        let (priority, priority_error) = match Priority::from_ordinal(self.priority) {
            Ok(priority) => (priority, None),
            Err(err) => (Priority::default(), Some(err)),
        };
        let payload = NewTodo {
            title: self.title,
            description: self.description,
            priority,
        };
        let mut violations = payload.violations();
        violations.extend(priority_error);
        if violations.is_empty() {
            Ok(payload)
        } else {
            Err(violations)
        }
    }
}

/// Partial update request as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
}

impl UpdateTodoRequest {
    /// Converts into a checked update.
    ///
    /// # Errors
    /// - Returns every violated rule among present fields, in field order.
    pub fn into_update(self) -> Result<TodoUpdate, Vec<TodoValidationError>> {
        let (priority, priority_error) = match self.priority.map(Priority::from_ordinal) {
            Some(Ok(priority)) => (Some(priority), None),
            Some(Err(err)) => (None, Some(err)),
            None => (None, None),
        };
        let update = TodoUpdate {
            title: self.title,
            description: self.description,
            priority,
        };
        let mut violations = update.violations();
        violations.extend(priority_error);
        if violations.is_empty() {
            Ok(update)
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_description, check_title, Priority, TodoValidationError};

    #[test]
    fn title_bounds_count_chars_not_bytes() {
        assert!(check_title("日本語").is_ok());
        assert_eq!(
            check_title("ab"),
            Err(TodoValidationError::TitleTooShort { chars: 2 })
        );
        assert!(check_title(&"x".repeat(150)).is_ok());
        assert_eq!(
            check_title(&"x".repeat(151)),
            Err(TodoValidationError::TitleTooLong { chars: 151 })
        );
    }

    #[test]
    fn description_bounds_are_inclusive() {
        assert!(check_description("12345").is_ok());
        assert!(check_description(&"d".repeat(512)).is_ok());
        assert!(check_description("1234").is_err());
        assert!(check_description(&"d".repeat(513)).is_err());
    }

    #[test]
    fn priority_ordinals_follow_urgency() {
        assert_eq!(u8::from(Priority::High), 1);
        assert_eq!(u8::from(Priority::Medium), 2);
        assert_eq!(u8::from(Priority::Low), 3);
        assert_eq!(Priority::default(), Priority::Low);
        assert!(Priority::High < Priority::Low);
        assert_eq!(
            Priority::try_from(0),
            Err(TodoValidationError::InvalidPriority(0))
        );
        assert_eq!(Priority::from_ordinal(1), Ok(Priority::High));
        assert_eq!(
            Priority::from_ordinal(-1),
            Err(TodoValidationError::InvalidPriority(-1))
        );
        assert_eq!(
            Priority::from_ordinal(259),
            Err(TodoValidationError::InvalidPriority(259))
        );
    }
}
