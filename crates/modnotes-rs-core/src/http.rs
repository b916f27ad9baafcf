//! reqwest-backed transport.

use log::debug;
use modnotes_rs_config::ApiConfig;
use modnotes_rs_protocol::{ApiRequest, Method, Transport, TransportError};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Blocking HTTP transport against the reddit API.
///
/// Uses reqwest's blocking client, so it must not be driven from inside an
/// async runtime's worker thread.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        let url = self.url(&request.path);
        debug!("sending http request (method={}, url={})", request.method, url);

        let mut builder = self
            .client
            .request(method, &url)
            .query(&[("raw_json", "1")])
            .query(&request.query);
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        decode_response(status, body)
    }
}

/// Map a received status and body to the decoded payload.
fn decode_response(status: StatusCode, body: String) -> Result<Value, TransportError> {
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|err| TransportError::Decode(err.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
