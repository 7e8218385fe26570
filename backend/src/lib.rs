//! Development stand-in for the managed to-do data API.
//!
//! One model, `Todo { description, status }`, guarded by the owner rule in
//! [`auth`]. Records live in memory for the lifetime of the router.

pub mod auth;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use auth::Owner;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub description: String,
    pub status: TodoStatus,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload. `owner` is never read from the body; it comes from the
/// caller identity.
#[derive(Deserialize)]
pub struct CreateTodo {
    pub description: String,
    #[serde(default)]
    pub status: TodoStatus,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub status: TodoStatus,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>, owner: Owner) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    let mut mine: Vec<Todo> = todos
        .values()
        .filter(|todo| todo.owner == owner.as_str())
        .cloned()
        .collect();
    mine.sort_by_key(|todo| todo.created_at);
    Json(mine)
}

async fn create_todo(
    State(db): State<Db>,
    owner: Owner,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if input.description.trim().is_empty() {
        tracing::warn!(%owner, "rejected todo with empty description");
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        description: input.description,
        status: input.status,
        owner: owner.0,
        created_at: now,
        updated_at: now,
    };
    db.write().await.insert(todo.id, todo.clone());
    tracing::info!(id = %todo.id, owner = %todo.owner, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos
        .get(&id)
        .filter(|todo| auth::authorize(&todo.owner, &owner).is_ok())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    owner: Owner,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    auth::authorize(&todo.owner, &owner).inspect_err(|_| {
        tracing::warn!(%id, %owner, "update denied by owner rule");
    })?;
    todo.status = input.status;
    todo.updated_at = Utc::now();
    tracing::info!(%id, status = ?todo.status, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    auth::authorize(&todo.owner, &owner).inspect_err(|_| {
        tracing::warn!(%id, %owner, "delete denied by owner rule");
    })?;
    todos.remove(&id);
    tracing::info!(%id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
