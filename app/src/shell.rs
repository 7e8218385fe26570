//! Wires the gate, the list view and a transport together.
//!
//! Round trips run one after another: a mutation's refresh is sent only
//! once the mutation has resolved.

use thiserror::Error;
use todo_core::{BackendConfig, Dispatch, Phase, Session, TodoClient, TodoListView, ViewError};
use uuid::Uuid;

use crate::gate::{AuthGate, GateError};
use crate::transport::Transport;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("sign in first")]
    NotSignedIn,

    #[error("no row {0}")]
    NoSuchRow(usize),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    View(#[from] ViewError),
}

pub struct TodoApp<T> {
    config: BackendConfig,
    transport: T,
    gate: AuthGate,
    view: Option<TodoListView>,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(config: BackendConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            gate: AuthGate::new(),
            view: None,
        }
    }

    /// Sign in and mount the list for that identity. A rejected id leaves the
    /// current session and list untouched.
    pub fn sign_in(&mut self, login_id: &str) -> Result<(), AppError> {
        let session = self.gate.sign_in(login_id)?;
        let mut view = TodoListView::new(TodoClient::new(&self.config, session));
        if let Some(mut previous) = self.view.take() {
            previous.unmount();
        }
        let dispatch = view.mount();
        self.view = Some(view);
        self.drive(dispatch)
    }

    pub fn sign_out(&mut self) {
        self.unmount();
        self.gate.sign_out();
    }

    pub fn add(&mut self, description: &str) -> Result<(), AppError> {
        let view = self.view_mut()?;
        view.set_draft(description);
        let dispatch = view.submit()?;
        self.drive(dispatch)
    }

    pub fn toggle(&mut self, row: usize) -> Result<(), AppError> {
        let id = self.row_id(row)?;
        let dispatch = self.view_mut()?.toggle(id)?;
        self.drive(dispatch)
    }

    pub fn delete(&mut self, row: usize) -> Result<(), AppError> {
        let id = self.row_id(row)?;
        let dispatch = self.view_mut()?.remove(id)?;
        self.drive(dispatch)
    }

    pub fn refresh(&mut self) -> Result<(), AppError> {
        let dispatch = self.view_mut()?.refresh()?;
        self.drive(dispatch)
    }

    pub fn session(&self) -> Option<&Session> {
        self.gate.session()
    }

    pub fn view(&self) -> Option<&TodoListView> {
        self.view.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.view.as_mut().and_then(TodoListView::take_alert)
    }

    /// Draw the screen as plain text.
    pub fn render(&self) -> String {
        let (Some(login_id), Some(view)) = (self.gate.current_user_login_id(), self.view.as_ref()) else {
            return "Sign in with `login <id>` to see your to-dos.\n".to_string();
        };

        let mut out = String::new();
        out.push_str("My To-Do App\n");
        out.push_str(&format!("Hello, {login_id}  [logout]\n\n"));
        out.push_str(&format!("New to-do: {}  [add <text>]\n", view.draft()));
        if let Some(alert) = view.alert() {
            out.push_str(&format!("! {alert}\n"));
        }
        out.push_str("\nMy To-Dos:\n");

        if view.phase() == Phase::Loading {
            out.push_str("Loading...\n");
        } else if view.todos().is_empty() {
            out.push_str("No to-dos yet! Add one above.\n");
        } else {
            for (i, todo) in view.todos().iter().enumerate() {
                let (check, text) = if todo.status.is_completed() {
                    ("[x]", strike(&todo.description))
                } else {
                    ("[ ]", todo.description.clone())
                };
                out.push_str(&format!("{:>3}. {check} {text}  [delete]\n", i + 1));
            }
        }
        out
    }

    fn view_mut(&mut self) -> Result<&mut TodoListView, AppError> {
        self.view.as_mut().ok_or(AppError::NotSignedIn)
    }

    fn row_id(&self, row: usize) -> Result<Uuid, AppError> {
        let view = self.view.as_ref().ok_or(AppError::NotSignedIn)?;
        row.checked_sub(1)
            .and_then(|i| view.todos().get(i))
            .map(|todo| todo.id)
            .ok_or(AppError::NoSuchRow(row))
    }

    fn unmount(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.unmount();
        }
    }

    fn drive(&mut self, dispatch: Dispatch) -> Result<(), AppError> {
        let mut next = Some(dispatch);
        while let Some(dispatch) = next {
            let outcome = self.transport.execute(&dispatch.request);
            next = self.view_mut()?.complete(dispatch.ticket, outcome);
        }
        Ok(())
    }
}

fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

    use super::*;

    /// Replays canned responses and records what was sent.
    #[derive(Default)]
    struct Scripted {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn sent_methods(&self) -> Vec<HttpMethod> {
            self.sent.borrow().iter().map(|r| r.method).collect()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".into())))
        }
    }

    const MILK: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","description":"Buy milk","status":"pending","owner":"alice","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}"#;
    const MILK_DONE: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","description":"Buy milk","status":"completed","owner":"alice","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:01:00Z"}"#;

    fn app(transport: Scripted) -> TodoApp<Scripted> {
        TodoApp::new(BackendConfig::new("http://localhost:3000"), transport)
    }

    #[test]
    fn nothing_renders_before_sign_in() {
        let mut app = app(Scripted::default());
        assert!(app.render().starts_with("Sign in"));
        assert!(matches!(app.add("Buy milk"), Err(AppError::NotSignedIn)));
        assert!(app.transport().sent.borrow().is_empty());
    }

    #[test]
    fn empty_description_makes_no_calls() {
        let mut app = app(Scripted::default().reply(200, "[]"));
        app.sign_in("alice").unwrap();
        let before = app.transport().sent.borrow().len();

        let err = app.add("").unwrap_err();
        assert!(matches!(err, AppError::View(ViewError::EmptyDescription)));
        assert_eq!(app.transport().sent.borrow().len(), before);
        assert!(app.render().contains("! Please enter a description."));
        assert_eq!(app.dismiss_alert().as_deref(), Some("Please enter a description."));
    }

    #[test]
    fn every_mutation_is_followed_by_a_list() {
        let transport = Scripted::default()
            .reply(200, "[]")
            .reply(201, MILK)
            .reply(200, &format!("[{MILK}]"))
            .reply(200, MILK_DONE)
            .reply(200, &format!("[{MILK_DONE}]"))
            .reply(204, "")
            .reply(200, "[]");
        let mut app = app(transport);

        app.sign_in("alice").unwrap();
        app.add("Buy milk").unwrap();
        assert!(app.render().contains("[ ] Buy milk"));
        app.toggle(1).unwrap();
        assert!(app.render().contains("[x]"));
        app.delete(1).unwrap();
        assert!(app.render().contains("No to-dos yet! Add one above."));

        use HttpMethod::*;
        assert_eq!(
            app.transport().sent_methods(),
            vec![Get, Post, Get, Put, Get, Delete, Get]
        );
    }

    #[test]
    fn failed_mutation_still_resyncs() {
        let transport = Scripted::default()
            .reply(200, &format!("[{MILK}]"))
            .reply(403, "")
            .reply(200, &format!("[{MILK}]"));
        let mut app = app(transport);
        app.sign_in("alice").unwrap();
        app.toggle(1).unwrap();
        assert_eq!(app.view().unwrap().todos()[0].status, todo_core::TodoStatus::Pending);
        assert_eq!(app.transport().sent.borrow().len(), 3);
    }

    #[test]
    fn unknown_row_is_reported() {
        let mut app = app(Scripted::default().reply(200, "[]"));
        app.sign_in("alice").unwrap();
        assert!(matches!(app.toggle(3), Err(AppError::NoSuchRow(3))));
    }

    #[test]
    fn header_shows_login_and_sign_out_unmounts() {
        let mut app = app(Scripted::default().reply(200, "[]"));
        app.sign_in("alice@example.com").unwrap();
        assert!(app.render().contains("Hello, alice@example.com"));
        app.sign_out();
        assert!(app.view().is_none());
        assert!(app.session().is_none());
        assert!(app.render().starts_with("Sign in"));
    }

    #[test]
    fn rejected_second_sign_in_keeps_the_current_list() {
        let mut app = app(Scripted::default().reply(200, &format!("[{MILK}]")));
        app.sign_in("alice").unwrap();

        let err = app.sign_in("   ").unwrap_err();
        assert!(matches!(err, AppError::Gate(GateError::EmptyLoginId)));
        assert_eq!(app.session().map(Session::login_id), Some("alice"));
        assert!(app.view().is_some_and(TodoListView::is_mounted));
        assert!(app.render().contains("Hello, alice"));
        assert!(app.render().contains("[ ] Buy milk"));
        assert_eq!(app.transport().sent.borrow().len(), 1);
    }

    #[test]
    fn switching_users_unmounts_the_previous_list() {
        let transport = Scripted::default().reply(200, &format!("[{MILK}]")).reply(200, "[]");
        let mut app = app(transport);
        app.sign_in("alice").unwrap();
        app.sign_in("bob").unwrap();
        assert_eq!(app.session().map(Session::login_id), Some("bob"));
        assert!(app.view().unwrap().todos().is_empty());
        let sent = app.transport().sent.borrow();
        assert_eq!(sent[1].header("authorization"), Some("Bearer bob"));
    }

    #[test]
    fn requests_carry_the_session_identity() {
        let mut app = app(Scripted::default().reply(200, "[]"));
        app.sign_in("alice").unwrap();
        let sent = app.transport().sent.borrow();
        assert_eq!(sent[0].header("authorization"), Some("Bearer alice"));
    }
}
