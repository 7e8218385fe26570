//! I/O-free data client and list view for the owner-scoped to-do API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `TodoClient` holds the backend URL from `BackendConfig` and the signed-in
//!   `Session`; nothing is read from process-wide state.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoListView` is the list screen as a state machine. It hands out
//!   ticketed `Dispatch`es and takes their outcomes back through `complete`.
//! - DTOs are defined independently from the backend crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::{Session, TodoClient};
pub use config::BackendConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, TodoStatus, UpdateTodo};
pub use view::{Dispatch, Phase, Ticket, TodoListView, ViewError};
