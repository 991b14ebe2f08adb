//! Blocking HTTP execution of core requests.

use medicine_core::{HttpMethod, HttpRequest, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {path}: {source}")]
    Request {
        method: HttpMethod,
        path: String,
        #[source]
        source: ureq::Error,
    },
    #[error("request task failed: {0}")]
    Task(String),
}

/// Executes one request to completion. Called from a blocking task, so
/// implementations may block.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `ureq` agent that returns 4xx/5xx responses as data.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
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
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let fail = |source| TransportError::Request {
            method,
            path: path.clone(),
            source,
        };

        let result = match method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&path);
                for (key, value) in &headers {
                    builder = builder.header(key, value);
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Delete => {
                let mut builder = match method {
                    HttpMethod::Post => self.agent.post(&path),
                    _ => self.agent.delete(&path).force_send_body(),
                };
                for (key, value) in &headers {
                    builder = builder.header(key, value);
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(fail)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(fail)?;

        Ok(HttpResponse { status, headers, body })
    }
}
