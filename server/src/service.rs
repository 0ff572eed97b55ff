//! HTTP handlers for the todo API.
//!
//! Each handler validates its input first, then runs exactly one store call
//! on the blocking pool and maps the outcome to a status code.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::model::{parse_create, parse_id, parse_update, Todo};
use crate::store::{StoreError, StoreResult, TodoStore};

pub type SharedStore = Arc<dyn TodoStore>;

/// Runs a store operation off the async executor.
async fn with_store<T, F>(store: &SharedStore, op: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn TodoStore) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(&*store))
        .await
        .map_err(|err| StoreError::Task(err.to_string()))?
}

/// A body that is not valid JSON is treated like an empty object.
fn body_value(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(%rejection, "request body is not usable JSON");
            Value::Null
        }
    }
}

pub async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, ServiceError> {
    let todos = with_store(&store, |store| store.list())
        .await
        .map_err(|err| ServiceError::from_store("Failed to fetch todos", err))?;
    Ok(Json(todos))
}

pub async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ServiceError> {
    let id = parse_id(&id)?;
    let todo = with_store(&store, move |store| store.get(id))
        .await
        .map_err(|err| ServiceError::from_store("Failed to fetch todo", err))?;
    Ok(Json(todo))
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ServiceError> {
    let title = parse_create(&body_value(body))?;
    let todo = with_store(&store, move |store| store.create(&title))
        .await
        .map_err(|err| ServiceError::from_store("Failed to create todo", err))?;
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ServiceError> {
    let id = parse_id(&id)?;
    let patch = parse_update(&body_value(body))?;
    let todo = with_store(&store, move |store| store.update(id, &patch))
        .await
        .map_err(|err| ServiceError::from_store("Failed to update todo", err))?;
    info!(id, completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id(&id)?;
    with_store(&store, move |store| store.delete(id))
        .await
        .map_err(|err| ServiceError::from_store("Failed to delete todo", err))?;
    info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
