//! Routes and handlers for the todo API.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use lazytodo_core::{CreateTodoRequest, Todo, TodoId, UpdateTodoRequest};
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;

pub const INDEX_MESSAGE: &str = "The server is working!";

/// Query string of `GET /todos`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    /// Keep at most this many todos from the front.
    pub first_n: Option<usize>,
}

/// Builds the API router over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": INDEX_MESSAGE }))
}

async fn list_todos(
    State(state): State<AppState>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(query) = query?;
    let todos = state.todos.read().await.list_todos(query.first_n)?;
    Ok(Json(todos))
}

async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    let todo = state.todos.read().await.get_todo(id)?;
    Ok(Json(todo))
}

async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(request) = payload?;
    let payload = request
        .into_new_todo()
        .map_err(|violations| ApiError::from_violations(&violations))?;

    let created = state.todos.write().await.create_todo(&payload)?;
    info!(
        "event=todo_create module=http status=ok id={} priority={}",
        created.id, created.priority
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let update = request
        .into_update()
        .map_err(|violations| ApiError::from_violations(&violations))?;

    let updated = state.todos.write().await.update_todo(id, &update)?;
    info!("event=todo_update module=http status=ok id={id}");
    Ok(Json(updated))
}

async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    let deleted = state.todos.write().await.delete_todo(id)?;
    info!("event=todo_delete module=http status=ok id={id}");
    Ok(Json(deleted))
}

/// Logs one line per request with method, path, HTTP status and duration.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(req).await;

    let outcome = if response.status().is_server_error() {
        "error"
    } else {
        "ok"
    };
    info!(
        "event=http_request module=http status={outcome} method={method} path={path} http_status={} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
