//! HTTP error mapping.
//!
//! Bodies follow one shape per status:
//! - 404: `{"detail": "Todo not found"}`
//! - 422: `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`
//! - 500: `{"detail": "Internal server error"}`

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lazytodo_core::{RepoError, TodoId, TodoValidationError};
use log::{error, warn};
use serde::Serialize;
use serde_json::json;
use std::fmt;

pub const NOT_FOUND_DETAIL: &str = "Todo not found";

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|part| (*part).to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Maps a body field violation.
    pub fn body(err: &TodoValidationError) -> Self {
        Self::new(&["body", err.field()], err.to_string(), err.kind())
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(TodoId),
    Validation(Vec<FieldError>),
    Internal(String),
}

impl ApiError {
    pub fn from_violations(violations: &[TodoValidationError]) -> Self {
        Self::Validation(violations.iter().map(FieldError::body).collect())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Validation(errors) => write!(f, "{} invalid field(s)", errors.len()),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(vec![FieldError::body(&err)]),
            RepoError::Duplicate(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(vec![FieldError::new(
            &["body"],
            rejection.body_text(),
            "json_invalid",
        )])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(vec![FieldError::new(
            &["path", "id"],
            rejection.body_text(),
            "uuid_parsing",
        )])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(vec![FieldError::new(
            &["query", "first_n"],
            rejection.body_text(),
            "int_parsing",
        )])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound(id) => {
                warn!("event=todo_lookup module=http status=error error_code=not_found id={id}");
                json!({ "detail": NOT_FOUND_DETAIL })
            }
            Self::Validation(errors) => {
                warn!(
                    "event=request_validation module=http status=error error_code=unprocessable fields={}",
                    errors.len()
                );
                json!({ "detail": errors })
            }
            Self::Internal(message) => {
                error!("event=request module=http status=error error_code=internal error={message}");
                json!({ "detail": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
