//! Executing `HttpRequest` values over the network.

use tracing::debug;
use ureq::typestate::WithBody;

use crate::error::{ClockifyError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; only failures
/// that produced no response at all are errors.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to the client, not the agent.
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

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => decorate(self.agent.get(url), request).call(),
            HttpMethod::Delete => decorate(self.agent.delete(url), request).call(),
            HttpMethod::Post => send_body(decorate(self.agent.post(url), request), request),
            HttpMethod::Put => send_body(decorate(self.agent.put(url), request), request),
            HttpMethod::Patch => send_body(decorate(self.agent.patch(url), request), request),
        };
        let mut response = result.map_err(|e| ClockifyError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ClockifyError::Transport(e.to_string()))?;

        debug!(method = %request.method, url, status, "received response");
        Ok(HttpResponse { status, body })
    }
}
