//! Client core for the to-do list.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and holds the UI state
//! container the frontend renders.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `ui::UiState` is an immutable snapshot advanced by pure transitions;
//!   `view::render` turns a snapshot into text.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod ui;
pub mod view;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use ui::{Action, Editing, SaveIntent, UiState};
