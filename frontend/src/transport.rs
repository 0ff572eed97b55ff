//! Host side of the host-does-IO split: executes `HttpRequest` values.

use thiserror::Error;
use todo_core::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] ureq::Error),
}

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport over a shared ureq agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as data so the core client interprets them
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
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();
        let mut response = match (request.method, body) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(url).send_empty(),
        }?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        Ok(HttpResponse::new(status, body))
    }
}
