//! REST backend for the to-do list.
//!
//! # Overview
//! `store` owns the SQLite `todos` table behind the `TodoStore` trait,
//! `service` holds the axum handlers, and `error` maps failures to
//! `{"error": ...}` responses. `app` wires them into a `Router`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

pub use config::Config;
pub use error::ServiceError;
pub use model::{Todo, TodoPatch};
pub use service::SharedStore;
pub use store::{SqliteStore, StoreError, TodoStore};

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/todos", get(service::list_todos).post(service::create_todo))
        .route(
            "/todos/{id}",
            get(service::get_todo)
                .put(service::update_todo)
                .delete(service::delete_todo),
        )
        .layer(axum::middleware::from_fn(middleware::allow_any_origin))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(store)
}

/// Router over a fresh in-memory store.
pub fn in_memory_app() -> Result<Router, StoreError> {
    Ok(app(Arc::new(SqliteStore::open_in_memory()?)))
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
