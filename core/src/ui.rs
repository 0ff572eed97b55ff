//! Client-side state container for the to-do list.
//!
//! # Design
//! `UiState` is an immutable snapshot. Every user gesture or request outcome
//! is an [`Action`], and [`UiState::apply`] returns the next snapshot without
//! touching the original. Nothing in the cached list changes until the server
//! has answered; a failed request only fills the error slot.
//!
//! The `*_intent` methods answer "what request would this gesture send right
//! now", so the host decides whether to talk to the network at all (blank
//! input, empty edit, unconfirmed delete) from the state alone.

use crate::error::ApiError;
use crate::types::{CreateTodo, Todo, UpdateTodo};

pub const LOAD_FAILED: &str = "Failed to load todos";
pub const ADD_FAILED: &str = "Failed to add todo";
pub const TOGGLE_FAILED: &str = "Failed to toggle todo";
pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";

/// The item currently in edit mode and its unsaved title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Cached copy of the server's list, newest first.
    pub todos: Vec<Todo>,
    /// Pending title for the next add.
    pub new_title: String,
    /// At most one item is edited at a time.
    pub editing: Option<Editing>,
    /// Item awaiting delete confirmation.
    pub confirming_delete: Option<i64>,
    pub loading: bool,
    /// Last error wins.
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum Action {
    NewTitleChanged(String),
    StartEditing(i64),
    EditTitleChanged(String),
    /// Escape: leave edit mode without saving.
    CancelEditing,
    RequestDelete(i64),
    DismissDelete,
    /// A mutation request is about to be sent; clears the error slot.
    RequestStarted,
    /// The confirmed delete is about to be sent.
    DeleteConfirmed,
    LoadStarted,
    Loaded(Result<Vec<Todo>, ApiError>),
    Created(Result<Todo, ApiError>),
    Toggled(Result<Todo, ApiError>),
    Saved(Result<Todo, ApiError>),
    Deleted { id: i64, result: Result<(), ApiError> },
}

/// What saving the current edit should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveIntent {
    NotEditing,
    /// The edited title is blank; saving degrades to cancelling.
    Cancel,
    Submit { id: i64, update: UpdateTodo },
}

impl UiState {
    /// State at first mount, before the initial fetch has been issued.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, action: Action) -> UiState {
        let mut next = self.clone();
        match action {
            Action::NewTitleChanged(title) => next.new_title = title,
            Action::StartEditing(id) => {
                if let Some(todo) = self.find(id) {
                    next.editing = Some(Editing {
                        id,
                        title: todo.title.clone(),
                    });
                }
            }
            Action::EditTitleChanged(title) => {
                if let Some(editing) = next.editing.as_mut() {
                    editing.title = title;
                }
            }
            Action::CancelEditing => next.editing = None,
            Action::RequestDelete(id) => {
                if self.find(id).is_some() {
                    next.confirming_delete = Some(id);
                }
            }
            Action::DismissDelete => next.confirming_delete = None,
            Action::RequestStarted => next.error = None,
            Action::DeleteConfirmed => {
                next.confirming_delete = None;
                next.error = None;
            }
            Action::LoadStarted => {
                next.loading = true;
                next.error = None;
            }
            Action::Loaded(result) => {
                next.loading = false;
                match result {
                    Ok(todos) => next.todos = todos,
                    Err(_) => next.error = Some(LOAD_FAILED.to_string()),
                }
            }
            Action::Created(result) => match result {
                Ok(todo) => {
                    next.todos.insert(0, todo);
                    next.new_title.clear();
                }
                Err(_) => next.error = Some(ADD_FAILED.to_string()),
            },
            Action::Toggled(result) => match result {
                Ok(todo) => next.replace(todo),
                Err(_) => next.error = Some(TOGGLE_FAILED.to_string()),
            },
            Action::Saved(result) => match result {
                Ok(todo) => {
                    next.replace(todo);
                    next.editing = None;
                }
                Err(_) => next.error = Some(UPDATE_FAILED.to_string()),
            },
            Action::Deleted { id, result } => match result {
                Ok(()) => {
                    next.todos.retain(|todo| todo.id != id);
                    if next.editing.as_ref().is_some_and(|e| e.id == id) {
                        next.editing = None;
                    }
                }
                Err(_) => next.error = Some(DELETE_FAILED.to_string()),
            },
        }
        next
    }

    pub fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    fn replace(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == updated.id) {
            *slot = updated;
        }
    }

    /// The edit buffer, if `id` is the item being edited.
    pub fn edit_buffer(&self, id: i64) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|editing| editing.id == id)
            .map(|editing| editing.title.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    /// The empty-state message is hidden while the initial fetch is in flight.
    pub fn shows_empty_state(&self) -> bool {
        !self.loading && self.todos.is_empty()
    }

    /// `None` for blank input: adding is a no-op.
    pub fn add_intent(&self) -> Option<CreateTodo> {
        let title = self.new_title.trim();
        (!title.is_empty()).then(|| CreateTodo {
            title: title.to_string(),
        })
    }

    /// Inverts the cached `completed` flag of `id`.
    pub fn toggle_intent(&self, id: i64) -> Option<UpdateTodo> {
        self.find(id).map(|todo| UpdateTodo::completed(!todo.completed))
    }

    pub fn save_intent(&self) -> SaveIntent {
        let Some(editing) = &self.editing else {
            return SaveIntent::NotEditing;
        };
        let title = editing.title.trim();
        if title.is_empty() {
            return SaveIntent::Cancel;
        }
        SaveIntent::Submit {
            id: editing.id,
            update: UpdateTodo::title(title),
        }
    }

    /// The id to delete once the user has confirmed.
    pub fn delete_intent(&self) -> Option<i64> {
        self.confirming_delete
    }
}
