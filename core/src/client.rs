//! Request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds the backend URL and the caller's bearer header and
//! carries no mutable state between calls. Each CRUD operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.

use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoStatus, UpdateTodo};

/// Signed-in identity handed over by the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    login_id: String,
}

impl Session {
    pub fn new(login_id: &str) -> Self {
        Self {
            login_id: login_id.trim().to_string(),
        }
    }

    pub fn login_id(&self) -> &str {
        &self.login_id
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.login_id)
    }
}

/// Client for the owner-scoped todo API.
///
/// Every request is scoped to the session it was built with; the backend
/// filters and authorizes on that identity.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    authorization: String,
}

impl TodoClient {
    pub fn new(config: &BackendConfig, session: &Session) -> Self {
        Self {
            base_url: config.data_url().to_string(),
            authorization: session.bearer(),
        }
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("authorization".to_string(), self.authorization.clone())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/todos", self.base_url), None)
    }

    pub fn build_get_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/todos/{id}", self.base_url), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, format!("{}/todos", self.base_url), Some(body)))
    }

    pub fn build_update_todo(&self, id: Uuid, status: TodoStatus) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&UpdateTodo { status })
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, format!("{}/todos/{id}", self.base_url), Some(body)))
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/todos/{id}", self.base_url), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        401 => Err(ApiError::Unauthorized),
        403 => Err(ApiError::Forbidden),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
