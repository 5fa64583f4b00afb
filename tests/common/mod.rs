//! Shared test doubles for integration tests.

#![allow(dead_code)]

use rest_api_tool::{
    ClientConfig, LogConfig, OutboundRequest, RawResponse, RestClient, Transport, TransportError,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that records every request and replays scripted outcomes.
///
/// When the script runs out it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<OutboundRequest>>,
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn fail(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> OutboundRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}

pub fn quiet_config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::new(base_url);
    config.logging = LogConfig {
        console: false,
        file: None,
    };
    config
}

pub fn client_with(transport: &Arc<RecordingTransport>, base_url: &str) -> RestClient {
    RestClient::with_transport(quiet_config(base_url), transport.clone())
}
