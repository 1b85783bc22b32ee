//! `ureq`-backed transport.
//!
//! ureq is blocking, so each round trip runs on tokio's blocking pool. Status
//! codes are returned as data (`http_status_as_error(false)`); the core codec
//! decides what counts as success.

use std::time::Duration;

use async_trait::async_trait;
use todo_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let response = tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| TransportError::new(e.to_string()))?
            .map_err(|e| TransportError::new(e.to_string()))?;
        debug!(status = response.status, "response received");
        Ok(response)
    }
}

fn execute_blocking(agent: &Agent, request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let HttpRequest {
        method,
        path,
        headers,
        body,
    } = request;

    let mut response = match method {
        HttpMethod::Get => with_headers(agent.get(&path), &headers).call()?,
        HttpMethod::Delete => with_headers(agent.delete(&path), &headers).call()?,
        HttpMethod::Post => send(with_headers(agent.post(&path), &headers), body)?,
        HttpMethod::Put => send(with_headers(agent.put(&path), &headers), body)?,
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    Ok(HttpResponse::new(status, body))
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
