//! Executes the requests built by `todo_core` over real HTTP.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

/// Runs one round trip. Every HTTP status comes back as a response; only a
/// failure to get any response is an error.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let path = request.path.as_str();
        let body = request.body.as_deref().unwrap_or_default();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(path), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path), &request.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(path), &request.headers).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(path), &request.headers).send(body.as_bytes()),
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
