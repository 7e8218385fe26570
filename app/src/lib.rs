//! Host side of the to-do list: sign-in gate, HTTP transport and the shell
//! that drives `todo_core::TodoListView`.

pub mod command;
pub mod config;
pub mod gate;
pub mod shell;
pub mod transport;

pub use command::Command;
pub use gate::{AuthGate, GateError};
pub use shell::{AppError, TodoApp};
pub use transport::{Transport, UreqTransport};
