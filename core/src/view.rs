//! The to-do list screen as a host-driven state machine.
//!
//! # Design
//! The view never performs I/O. Every user event that needs the backend
//! returns a [`Dispatch`]: a request tagged with a [`Ticket`]. The host runs
//! the round trip and hands the outcome back through
//! [`TodoListView::complete`], which may return the follow-up dispatch (the
//! list refresh issued after every mutation).
//!
//! Local state is only ever replaced by a full list result. There is no
//! optimistic update and no partial patch. A list result is applied only if
//! its ticket is newer than the last one applied, so overlapping
//! mutation/refresh sequences settle on the freshest server state whatever
//! order their responses come back in.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo};

/// Message shown when the form is submitted without a description.
pub const EMPTY_DESCRIPTION_ALERT: &str = "Please enter a description.";

/// Identifies one outstanding round trip. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted, first list not resolved yet.
    Loading,
    Ready,
}

/// A request the host must execute, then report back with the same ticket.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{}", EMPTY_DESCRIPTION_ALERT)]
    EmptyDescription,

    #[error("no todo with id {0} is displayed")]
    UnknownTodo(Uuid),

    #[error("view is not mounted")]
    NotMounted,

    #[error(transparent)]
    Request(#[from] ApiError),
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Fetch,
    Create,
    Toggle(Uuid),
    Remove(Uuid),
}

#[derive(Debug)]
pub struct TodoListView {
    client: TodoClient,
    phase: Phase,
    todos: Vec<Todo>,
    draft: String,
    alert: Option<String>,
    mounted: bool,
    next_ticket: u64,
    pending: HashMap<Ticket, Pending>,
    applied: Option<Ticket>,
}

impl TodoListView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            phase: Phase::Loading,
            todos: Vec::new(),
            draft: String::new(),
            alert: None,
            mounted: false,
            next_ticket: 0,
            pending: HashMap::new(),
            applied: None,
        }
    }

    /// Start the screen: the first list fetch.
    pub fn mount(&mut self) -> Dispatch {
        self.mounted = true;
        self.phase = Phase::Loading;
        self.fetch()
    }

    /// Stop consuming responses. Anything still in flight is dropped when it
    /// resolves.
    pub fn unmount(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(in_flight = self.pending.len(), "unmounting with requests in flight");
        }
        self.mounted = false;
        self.pending.clear();
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Submit the create form. An empty description raises the alert and
    /// produces no request.
    pub fn submit(&mut self) -> Result<Dispatch, ViewError> {
        self.ensure_mounted()?;
        let Some(input) = CreateTodo::pending(&self.draft) else {
            tracing::warn!("create rejected: empty description");
            self.alert = Some(EMPTY_DESCRIPTION_ALERT.to_string());
            return Err(ViewError::EmptyDescription);
        };
        let request = self.client.build_create_todo(&input)?;
        Ok(self.issue(Pending::Create, request))
    }

    /// Checkbox click: ask for the opposite of the displayed status.
    pub fn toggle(&mut self, id: Uuid) -> Result<Dispatch, ViewError> {
        self.ensure_mounted()?;
        let current = self
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| todo.status)
            .ok_or(ViewError::UnknownTodo(id))?;
        let request = self.client.build_update_todo(id, current.toggled())?;
        Ok(self.issue(Pending::Toggle(id), request))
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Dispatch, ViewError> {
        self.ensure_mounted()?;
        let request = self.client.build_delete_todo(id);
        Ok(self.issue(Pending::Remove(id), request))
    }

    /// Re-issue the list fetch outside of a mutation.
    pub fn refresh(&mut self) -> Result<Dispatch, ViewError> {
        self.ensure_mounted()?;
        Ok(self.fetch())
    }

    /// Feed back the outcome of a dispatched round trip. Returns the refresh
    /// to run next when the completed call was a mutation.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Option<Dispatch> {
        if !self.mounted {
            tracing::debug!(?ticket, "response arrived after unmount, dropped");
            return None;
        }
        let Some(pending) = self.pending.remove(&ticket) else {
            tracing::debug!(?ticket, "response for unknown ticket, dropped");
            return None;
        };

        match pending {
            Pending::Fetch => {
                let result = outcome.and_then(|response| self.client.parse_list_todos(response));
                self.apply_list(ticket, result);
                None
            }
            Pending::Create => {
                match outcome.and_then(|response| self.client.parse_create_todo(response)) {
                    Ok(todo) => {
                        tracing::info!(id = %todo.id, "todo created");
                        self.draft.clear();
                    }
                    Err(err) => tracing::error!(error = %err, "error creating todo"),
                }
                Some(self.fetch())
            }
            Pending::Toggle(id) => {
                match outcome.and_then(|response| self.client.parse_update_todo(response)) {
                    Ok(todo) => tracing::info!(%id, status = %todo.status, "todo status updated"),
                    Err(err) => tracing::error!(%id, error = %err, "error updating todo"),
                }
                Some(self.fetch())
            }
            Pending::Remove(id) => {
                match outcome.and_then(|response| self.client.parse_delete_todo(response)) {
                    Ok(()) => tracing::info!(%id, "todo deleted"),
                    Err(err) => tracing::error!(%id, error = %err, "error deleting todo"),
                }
                Some(self.fetch())
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Dismiss the alert, returning its text.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    fn ensure_mounted(&self) -> Result<(), ViewError> {
        if self.mounted {
            Ok(())
        } else {
            Err(ViewError::NotMounted)
        }
    }

    fn fetch(&mut self) -> Dispatch {
        let request = self.client.build_list_todos();
        self.issue(Pending::Fetch, request)
    }

    fn issue(&mut self, pending: Pending, request: HttpRequest) -> Dispatch {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending.insert(ticket, pending);
        Dispatch { ticket, request }
    }

    fn apply_list(&mut self, ticket: Ticket, result: Result<Vec<Todo>, ApiError>) {
        match result {
            Ok(todos) if self.applied.map_or(true, |applied| ticket > applied) => {
                self.todos = todos;
                self.applied = Some(ticket);
            }
            Ok(_) => tracing::debug!(?ticket, "stale list response ignored"),
            Err(err) => tracing::error!(error = %err, "error fetching todos"),
        }
        self.phase = Phase::Ready;
    }
}
