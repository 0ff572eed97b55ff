//! Plain-text rendering of a `UiState` snapshot.

use std::fmt;

use crate::ui::UiState;

pub const HEADING: &str = "To-Do List";
pub const LOADING: &str = "Loading your to-dos…";
pub const EMPTY: &str = "No to-dos yet. Add your first one above";

/// Renders the whole screen. Items are numbered from 1 in list order; the
/// terminal frontend addresses them by that number.
pub fn render(state: &UiState) -> String {
    Screen(state).to_string()
}

/// A `UiState` formatted as the text screen.
struct Screen<'a>(&'a UiState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "{HEADING}")?;
        writeln!(f, "{}", "=".repeat(HEADING.len()))?;

        if state.loading {
            writeln!(f, "{LOADING}")?;
        }
        if let Some(error) = &state.error {
            writeln!(f, "! {error}")?;
        }
        if !state.loading && !state.todos.is_empty() {
            writeln!(
                f,
                "{} pending, {} completed",
                state.pending_count(),
                state.completed_count()
            )?;
        }
        if state.shows_empty_state() {
            writeln!(f, "{EMPTY}")?;
        }

        for (index, todo) in state.todos.iter().enumerate() {
            let mark = if todo.completed { 'x' } else { ' ' };
            match state.edit_buffer(todo.id) {
                Some(buffer) => writeln!(f, "{:>3}. [{mark}] editing: {buffer}_", index + 1)?,
                None => writeln!(f, "{:>3}. [{mark}] {}", index + 1, todo.title)?,
            }
        }

        if let Some(todo) = state.confirming_delete.and_then(|id| state.find(id)) {
            writeln!(f, "Delete \"{}\"? [y/N]", todo.title)?;
        }
        Ok(())
    }
}
