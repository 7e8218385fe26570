//! The signed-in list screen against a live backend.

use std::cell::Cell;

use todo_app::{AppError, GateError, TodoApp, Transport, UreqTransport};
use todo_core::{ApiError, BackendConfig, HttpRequest, HttpResponse, TodoStatus, ViewError};

/// Counts the round trips it forwards.
#[derive(Default)]
struct Counting {
    inner: UreqTransport,
    calls: Cell<usize>,
}

impl Transport for Counting {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.execute(request)
    }
}

fn start_backend() -> BackendConfig {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_backend::run(listener).await
        })
        .unwrap();
    });

    BackendConfig::new(&format!("http://{addr}"))
}

fn listed<T: Transport>(app: &TodoApp<T>) -> Vec<(String, TodoStatus)> {
    app.view()
        .unwrap()
        .todos()
        .iter()
        .map(|todo| (todo.description.clone(), todo.status))
        .collect()
}

#[test]
fn buy_milk_scenario() {
    let mut app = TodoApp::new(start_backend(), UreqTransport::new());
    app.sign_in("alice@example.com").unwrap();
    assert!(listed(&app).is_empty());

    app.add("Buy milk").unwrap();
    assert_eq!(listed(&app), vec![("Buy milk".to_string(), TodoStatus::Pending)]);
    assert_eq!(app.view().unwrap().draft(), "");

    app.toggle(1).unwrap();
    assert_eq!(listed(&app), vec![("Buy milk".to_string(), TodoStatus::Completed)]);

    app.delete(1).unwrap();
    assert!(listed(&app).is_empty());
    assert!(app.render().contains("No to-dos yet! Add one above."));
}

#[test]
fn empty_description_is_rejected_before_the_network() {
    let mut app = TodoApp::new(start_backend(), Counting::default());
    app.sign_in("alice@example.com").unwrap();
    let calls = app.transport().calls.get();

    let err = app.add("   ").unwrap_err();
    assert!(matches!(err, AppError::View(ViewError::EmptyDescription)));
    assert_eq!(app.transport().calls.get(), calls, "no request may be sent");

    app.refresh().unwrap();
    assert!(listed(&app).is_empty());
}

#[test]
fn login_ids_that_cannot_be_sent_are_refused_at_the_gate() {
    let mut app = TodoApp::new(start_backend(), Counting::default());

    let err = app.sign_in("josé@example.com").unwrap_err();
    assert!(matches!(err, AppError::Gate(GateError::UnsendableLoginId(_))));
    assert!(app.session().is_none());
    assert!(app.view().is_none());
    assert_eq!(app.transport().calls.get(), 0);

    app.sign_in("jose@example.com").unwrap();
    app.add("Buy milk").unwrap();
    assert_eq!(listed(&app), vec![("Buy milk".to_string(), TodoStatus::Pending)]);
}

#[test]
fn each_user_sees_only_their_list() {
    let config = start_backend();
    let mut alice = TodoApp::new(config.clone(), UreqTransport::new());
    let mut bob = TodoApp::new(config, UreqTransport::new());
    alice.sign_in("alice@example.com").unwrap();
    bob.sign_in("bob@example.com").unwrap();

    alice.add("Alice's errand").unwrap();
    bob.add("Bob's errand").unwrap();
    alice.refresh().unwrap();

    assert_eq!(listed(&alice), vec![("Alice's errand".to_string(), TodoStatus::Pending)]);
    assert_eq!(listed(&bob), vec![("Bob's errand".to_string(), TodoStatus::Pending)]);
    assert!(alice
        .view()
        .unwrap()
        .todos()
        .iter()
        .all(|todo| todo.owner == "alice@example.com"));
}

#[test]
fn unreachable_backend_leaves_an_empty_ready_list() {
    // bind then drop to get a port nothing listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = TodoApp::new(BackendConfig::new(&format!("http://{addr}")), UreqTransport::new());

    app.sign_in("alice@example.com").unwrap();
    assert!(listed(&app).is_empty());
    assert_eq!(app.view().unwrap().phase(), todo_core::Phase::Ready);
}
