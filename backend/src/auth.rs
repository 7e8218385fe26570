//! Caller identity and the owner rule.
//!
//! The identity provider sits outside this service; the development backend
//! trusts the bearer value as the caller's login id. Every handler takes an
//! [`Owner`] so an unauthenticated request never reaches the store.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};

/// Login id of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;
        parse_bearer(value)
            .map(|login| Owner(login.to_string()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

fn parse_bearer(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|login| !login.is_empty())
}

/// Owner-only rule: a record may be read or written only by its creator.
pub fn authorize(record_owner: &str, caller: &Owner) -> Result<(), StatusCode> {
    if record_owner == caller.as_str() {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}
