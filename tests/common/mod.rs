//! Shared test support: a recording mock Ambari API and JSON fixtures.

#![allow(dead_code)]

use ambari_check::{AmbariApi, AmbariError, AmbariResult, CheckStatus, Credentials, MetricSink};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const HOST_METRICS: &str = include_str!("../fixtures/host_metrics.json");
pub const COMPONENT_METRICS: &str = include_str!("../fixtures/component_metrics.json");
pub const SERVICE_HEALTH: &str = include_str!("../fixtures/service_health.json");
pub const CLUSTERS: &str = include_str!("../fixtures/clusters.json");

pub fn fixture(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture must be valid JSON")
}

/// Hosts response with one host lacking metrics and one carrying the host fixture
pub fn hosts_response(cluster: &str) -> Value {
    json!({
        "href": format!("localhost/api/v1/clusters/{cluster}/hosts?fields=metrics"),
        "items": [
            {
                "href": format!("localhost/api/v1/clusters/{cluster}/hosts/my_host_1"),
                "Hosts": {"cluster_name": cluster, "host_name": "my_host_1"}
            },
            {
                "href": format!("localhost/api/v1/clusters/{cluster}/hosts/my_host_2"),
                "Hosts": {"cluster_name": cluster, "host_name": "my_host_2"},
                "metrics": fixture(HOST_METRICS)
            }
        ]
    })
}

pub fn auth() -> Credentials {
    Credentials::new("admin", "admin")
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Default)]
struct MockAmbariState {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    default_response: Option<Value>,
    calls: Vec<(String, Credentials)>,
}

/// Mock API answering from canned responses and recording every call
#[derive(Debug, Clone, Default)]
pub struct MockAmbariApi {
    state: Arc<Mutex<MockAmbariState>>,
}

impl MockAmbariApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every URL with the same document
    pub fn returning(response: Value) -> Self {
        let mock = Self::new();
        mock.state.lock().unwrap().default_response = Some(response);
        mock
    }

    pub fn with_response(self, url: impl Into<String>, response: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(url.into(), response);
        self
    }

    pub fn with_failure(self, url: impl Into<String>, status: u16) -> Self {
        self.state.lock().unwrap().failures.insert(url.into(), status);
        self
    }

    pub fn calls(&self) -> Vec<(String, Credentials)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn called_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }

    pub fn last_call(&self) -> Option<(String, Credentials)> {
        self.calls().last().cloned()
    }
}

#[async_trait]
impl AmbariApi for MockAmbariApi {
    async fn request(&self, url: &str, auth: &Credentials) -> AmbariResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((url.to_string(), auth.clone()));

        if let Some(status) = state.failures.get(url) {
            return Err(AmbariError::api_error(*status, "mock failure"));
        }

        state
            .responses
            .get(url)
            .or(state.default_response.as_ref())
            .cloned()
            .ok_or_else(|| AmbariError::api_error(404, format!("no mock response for {url}")))
    }
}

/// Sink whose every submission fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

impl MetricSink for FailingSink {
    fn submit_gauge(
        &self,
        _name: &str,
        _value: f64,
        _tags: &[String],
        _hostname: Option<&str>,
    ) -> AmbariResult<()> {
        Err(AmbariError::sink("down"))
    }

    fn submit_service_check(
        &self,
        _name: &str,
        _status: CheckStatus,
        _tags: &[String],
    ) -> AmbariResult<()> {
        Err(AmbariError::sink("down"))
    }
}
