use modnotes_rs_protocol::{ApiRequest, Transport, TransportError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

type Handler = Box<dyn Fn(&ApiRequest) -> Result<Value, TransportError> + Send + Sync>;

/// Transport that records every request and answers from a script.
///
/// Queued responses are served first, in order. Once the queue is empty the
/// handler (if any) answers; otherwise the call fails with a network error.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    handler: Option<Handler>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Value>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    pub fn push_response(&self, response: Value) {
        self.responses.lock().push_back(Ok(response));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().push(request.clone());
        if let Some(response) = self.responses.lock().pop_front() {
            return response;
        }
        match &self.handler {
            Some(handler) => handler(request),
            None => Err(TransportError::Network(format!(
                "no scripted response for {} {}",
                request.method, request.path
            ))),
        }
    }
}

/// Transport that rejects every request with the given status.
#[derive(Debug, Clone)]
pub struct FailingTransport {
    status: u16,
}

impl FailingTransport {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

impl Transport for FailingTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        Err(TransportError::Status {
            status: self.status,
            body: format!("{} {} rejected", request.method, request.path),
        })
    }
}
