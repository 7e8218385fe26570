//! Authentication gate.
//!
//! Nothing below the gate renders until a user is signed in. The identity
//! provider itself is external; the gate only holds the resulting session.

use thiserror::Error;
use todo_core::Session;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("login id must not be empty")]
    EmptyLoginId,

    /// The id travels in the `authorization` header, which only carries
    /// visible ASCII.
    #[error("login id {0:?} may only contain visible ASCII characters")]
    UnsendableLoginId(String),
}

#[derive(Debug, Default)]
pub struct AuthGate {
    session: Option<Session>,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, login_id: &str) -> Result<&Session, GateError> {
        if login_id.trim().is_empty() {
            return Err(GateError::EmptyLoginId);
        }
        if !login_id.trim().chars().all(|c| c.is_ascii_graphic()) {
            return Err(GateError::UnsendableLoginId(login_id.trim().to_string()));
        }
        let session = Session::new(login_id);
        tracing::info!(login_id = session.login_id(), "signed in");
        Ok(self.session.insert(session))
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(login_id = session.login_id(), "signed out");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user_login_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::login_id)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}
