//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently.
//! Wire keys are camelCase; `owner` and the timestamps are stamped by the
//! backend and never sent by the client.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion state of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

impl TodoStatus {
    /// The status a checkbox click moves to.
    pub fn toggled(self) -> Self {
        match self {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        self == TodoStatus::Completed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub status: TodoStatus,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    pub description: String,
    #[serde(default)]
    pub status: TodoStatus,
}

impl CreateTodo {
    /// A pending todo with the trimmed description, or `None` when nothing
    /// but whitespace was entered.
    pub fn pending(description: &str) -> Option<Self> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        Some(Self {
            description: description.to_string(),
            status: TodoStatus::Pending,
        })
    }
}

/// Request payload for a status change. The description is immutable once
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub status: TodoStatus,
}
