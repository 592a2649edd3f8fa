//! HTTP surface for LazyTodo.
//!
//! # Responsibility
//! - Expose the todo service as a JSON REST API.
//! - Translate core errors into stable HTTP status codes and bodies.
//!
//! # Invariants
//! - Handlers never touch the collection except through `TodoService`.
//! - Every rejection (bad JSON, bad path id, bad query) is answered with 422.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, FieldError};
pub use routes::create_router;
pub use server::{serve, serve_with_listener, ServerConfig, ServerError};
pub use state::AppState;
