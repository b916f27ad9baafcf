//! Request primitive shared by every endpoint call.

use serde_json::Value;
use std::fmt;

/// HTTP verbs used by the notes endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API call: verb, relative path, query parameters and form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, without a leading slash.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a form field, replacing an existing field with the same key.
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.form.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.form.push((key, value)),
        }
        self
    }

    /// Look up the first query parameter with the given key.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// Look up the form field with the given key.
    pub fn form_field(&self, key: &str) -> Option<&str> {
        lookup(&self.form, key)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Errors raised by a transport while performing a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Blocking request primitive consumed by the client.
pub trait Transport: Send + Sync {
    /// Perform a request and return the decoded JSON body (`null` when empty).
    fn send(&self, request: &ApiRequest) -> Result<Value, TransportError>;
}
