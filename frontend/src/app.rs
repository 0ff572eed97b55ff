//! Glue between line commands, the `UiState` container and the network.
//!
//! Every gesture follows the same shape: ask the state for an intent, stop
//! if there is none, otherwise mark the request as started, run one
//! round-trip and feed the outcome back as an `Action`.

use todo_core::{Action, ApiError, HttpRequest, HttpResponse, SaveIntent, TodoClient, UiState};
use tracing::{debug, warn};

use crate::command::{is_yes, Command, CommandError};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Help,
    Quit,
}

/// Called with the current state when the screen must be drawn before a
/// blocking request returns.
pub type Redraw = Box<dyn FnMut(&UiState)>;

pub struct App<T> {
    client: TodoClient,
    transport: T,
    state: UiState,
    redraw: Option<Redraw>,
}

impl<T: Transport> App<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: UiState::new(),
            redraw: None,
        }
    }

    pub fn with_redraw(mut self, redraw: impl FnMut(&UiState) + 'static) -> Self {
        self.redraw = Some(Box::new(redraw));
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        self.state = self.state.apply(action);
    }

    fn redraw(&mut self) {
        if let Some(redraw) = self.redraw.as_mut() {
            redraw(&self.state);
        }
    }

    /// One round-trip; transport failures become `ApiError::Transport`.
    fn send<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let request = request?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .transport
            .execute(&request)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let result = parse(&self.client, response);
        if let Err(err) = &result {
            warn!(method = %request.method, url = %request.url, error = %err, "request failed");
        }
        result
    }

    /// Fetches the full list, as on first mount. The loading screen is drawn
    /// before the request blocks.
    pub fn load(&mut self) {
        self.dispatch(Action::LoadStarted);
        self.redraw();
        let result = self.send(Ok(self.client.build_list_todos()), TodoClient::parse_list_todos);
        self.dispatch(Action::Loaded(result));
    }

    pub fn add(&mut self, title: String) {
        self.dispatch(Action::NewTitleChanged(title));
        let Some(input) = self.state.add_intent() else {
            return;
        };
        self.dispatch(Action::RequestStarted);
        let result = self.send(self.client.build_create_todo(&input), TodoClient::parse_create_todo);
        self.dispatch(Action::Created(result));
    }

    pub fn toggle(&mut self, id: i64) {
        let Some(update) = self.state.toggle_intent(id) else {
            return;
        };
        self.dispatch(Action::RequestStarted);
        let result = self.send(
            self.client.build_update_todo(id, &update),
            TodoClient::parse_update_todo,
        );
        self.dispatch(Action::Toggled(result));
    }

    pub fn save(&mut self) -> Result<(), CommandError> {
        match self.state.save_intent() {
            SaveIntent::NotEditing => Err(CommandError::NotEditing),
            SaveIntent::Cancel => {
                self.dispatch(Action::CancelEditing);
                Ok(())
            }
            SaveIntent::Submit { id, update } => {
                self.dispatch(Action::RequestStarted);
                let result = self.send(
                    self.client.build_update_todo(id, &update),
                    TodoClient::parse_update_todo,
                );
                self.dispatch(Action::Saved(result));
                Ok(())
            }
        }
    }

    /// Resolves the confirmation prompt opened by `delete <n>`.
    pub fn answer_delete(&mut self, confirmed: bool) {
        let Some(id) = self.state.delete_intent() else {
            return;
        };
        if !confirmed {
            self.dispatch(Action::DismissDelete);
            return;
        }
        self.dispatch(Action::DeleteConfirmed);
        let result = self.send(Ok(self.client.build_delete_todo(id)), TodoClient::parse_delete_todo);
        self.dispatch(Action::Deleted { id, result });
    }

    /// Maps a 1-based list position to an id.
    fn id_at(&self, position: usize) -> Result<i64, CommandError> {
        position
            .checked_sub(1)
            .and_then(|index| self.state.todos.get(index))
            .map(|todo| todo.id)
            .ok_or(CommandError::NoSuchItem(position))
    }

    /// Handles one input line. While a delete awaits confirmation the line
    /// is the answer to that prompt.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, CommandError> {
        if self.state.confirming_delete.is_some() {
            self.answer_delete(is_yes(line));
            return Ok(Flow::Continue);
        }
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        self.handle(line.parse()?)
    }

    pub fn handle(&mut self, command: Command) -> Result<Flow, CommandError> {
        match command {
            Command::Add(title) => self.add(title),
            Command::Toggle(position) => {
                let id = self.id_at(position)?;
                self.toggle(id);
            }
            Command::Edit(position) => {
                let id = self.id_at(position)?;
                self.dispatch(Action::StartEditing(id));
            }
            Command::Title(title) => {
                if self.state.editing.is_none() {
                    return Err(CommandError::NotEditing);
                }
                self.dispatch(Action::EditTitleChanged(title));
            }
            Command::Save => self.save()?,
            Command::Cancel => self.dispatch(Action::CancelEditing),
            Command::Delete(position) => {
                let id = self.id_at(position)?;
                self.dispatch(Action::RequestDelete(id));
            }
            Command::Reload => self.load(),
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}
