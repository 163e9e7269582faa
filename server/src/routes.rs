use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::{CreateTodo, NewTodo, Todo, TodoId, TodoPatch, UpdateTodo};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Todo>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub success: bool,
    pub data: Todo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub async fn index() -> Json<Banner> {
    Json(Banner {
        message: "Todo API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let todos = state
        .bounded(state.store().list())
        .await
        .map_err(ApiError::storage("Failed to fetch todos"))?;
    debug!(count = todos.len(), "listed todos");
    Ok(Json(ListResponse {
        success: true,
        count: todos.len(),
        data: todos,
    }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let input: CreateTodo = object_payload(payload)?;
    let todo = NewTodo::try_from(input).inspect_err(|err| debug!(%err, "create rejected"))?;

    let todo = state
        .bounded(state.store().create(todo))
        .await
        .map_err(ApiError::storage("Failed to create todo"))?;
    info!(id = %todo.id, "todo created");
    Ok((
        StatusCode::CREATED,
        Json(TodoResponse {
            success: true,
            data: todo,
        }),
    ))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let id: TodoId = id.parse()?;
    let input: UpdateTodo = object_payload(payload)?;
    let patch = TodoPatch::try_from(input).inspect_err(|err| debug!(%err, "update rejected"))?;

    let todo = state
        .bounded(state.store().update(id, patch))
        .await
        .map_err(ApiError::storage("Failed to update todo"))?
        .ok_or(ApiError::TodoNotFound)?;
    info!(id = %todo.id, completed = todo.completed, "todo updated");
    Ok(Json(TodoResponse {
        success: true,
        data: todo,
    }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: TodoId = id.parse()?;
    let deleted = state
        .bounded(state.store().delete(id))
        .await
        .map_err(ApiError::storage("Failed to delete todo"))?;
    if !deleted {
        return Err(ApiError::TodoNotFound);
    }
    info!(%id, "todo deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Todo deleted successfully".to_string(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Payloads must be JSON objects; derived `Deserialize` would also accept an
/// array matched to the fields by position.
fn object_payload<T: DeserializeOwned>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(fields) = payload.map_err(|rejection| {
        debug!(%rejection, "unparsable request body");
        ApiError::InvalidBody
    })?;
    serde_json::from_value(Value::Object(fields)).map_err(|err| {
        debug!(%err, "request body has the wrong shape");
        ApiError::InvalidBody
    })
}
