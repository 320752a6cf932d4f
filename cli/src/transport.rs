//! Executes the core's `HttpRequest`s over the network.

use posts_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Reply};

/// Something that can perform one HTTP exchange.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Reply;
}

/// Blocking transport backed by a shared ureq agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Non-2xx statuses come back as data; the core decides what they mean.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
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
    fn execute(&self, request: HttpRequest) -> Reply {
        let method = request.method;
        let url = request.url;

        let result = match (method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
        };

        let mut response = result.map_err(|e| {
            tracing::error!(method = method.as_str(), %url, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(method = method.as_str(), %url, status, "request completed");

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
