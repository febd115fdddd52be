//! # Metric Submission
//!
//! The outbound boundary of the poller. Everything collected from Ambari
//! leaves through a [`MetricSink`] as either a gauge or a service check.
//!
//! Names handed to a sink are un-namespaced (`cpu.cpu_idle`); the
//! `ambari.` namespace is applied by [`Submission::qualified_name`] when a
//! sink renders its output.

use parking_lot::Mutex;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

use crate::constants::{CheckStatus, METRIC_NAMESPACE};
use crate::error::{AmbariError, AmbariResult};

/// A single value leaving the poller
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Gauge {
        name: String,
        value: f64,
        tags: Vec<String>,
        hostname: Option<String>,
    },
    ServiceCheck {
        name: String,
        status: CheckStatus,
        tags: Vec<String>,
    },
}

impl Submission {
    pub fn gauge(name: &str, value: f64, tags: &[String], hostname: Option<&str>) -> Self {
        Submission::Gauge {
            name: name.to_string(),
            value,
            tags: tags.to_vec(),
            hostname: hostname.map(str::to_string),
        }
    }

    pub fn service_check(name: &str, status: CheckStatus, tags: &[String]) -> Self {
        Submission::ServiceCheck {
            name: name.to_string(),
            status,
            tags: tags.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Submission::Gauge { name, .. } | Submission::ServiceCheck { name, .. } => name,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Submission::Gauge { tags, .. } | Submission::ServiceCheck { tags, .. } => tags,
        }
    }

    /// Name with the `ambari.` namespace applied
    pub fn qualified_name(&self) -> String {
        format!("{METRIC_NAMESPACE}.{}", self.name())
    }

    /// Render for output, with the qualified name and the numeric check status
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Submission::Gauge {
                value,
                tags,
                hostname,
                ..
            } => json!({
                "type": "gauge",
                "name": self.qualified_name(),
                "value": value,
                "tags": tags,
                "hostname": hostname,
            }),
            Submission::ServiceCheck { status, tags, .. } => json!({
                "type": "service_check",
                "name": self.qualified_name(),
                "status": status.code(),
                "tags": tags,
            }),
        }
    }
}

/// Destination for gauges and service checks
pub trait MetricSink: Send + Sync {
    fn submit_gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        hostname: Option<&str>,
    ) -> AmbariResult<()>;

    fn submit_service_check(
        &self,
        name: &str,
        status: CheckStatus,
        tags: &[String],
    ) -> AmbariResult<()>;
}

impl<T: MetricSink + ?Sized> MetricSink for Arc<T> {
    fn submit_gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        hostname: Option<&str>,
    ) -> AmbariResult<()> {
        (**self).submit_gauge(name, value, tags, hostname)
    }

    fn submit_service_check(
        &self,
        name: &str,
        status: CheckStatus,
        tags: &[String],
    ) -> AmbariResult<()> {
        (**self).submit_service_check(name, status, tags)
    }
}

/// Keeps every submission in memory, in submission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    submissions: Mutex<Vec<Submission>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    pub fn gauges(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .iter()
            .filter(|s| matches!(s, Submission::Gauge { .. }))
            .cloned()
            .collect()
    }

    pub fn service_checks(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .iter()
            .filter(|s| matches!(s, Submission::ServiceCheck { .. }))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.lock().is_empty()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<Submission> {
        std::mem::take(&mut *self.submissions.lock())
    }
}

impl MetricSink for RecordingSink {
    fn submit_gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        hostname: Option<&str>,
    ) -> AmbariResult<()> {
        self.submissions
            .lock()
            .push(Submission::gauge(name, value, tags, hostname));
        Ok(())
    }

    fn submit_service_check(
        &self,
        name: &str,
        status: CheckStatus,
        tags: &[String],
    ) -> AmbariResult<()> {
        self.submissions
            .lock()
            .push(Submission::service_check(name, status, tags));
        Ok(())
    }
}

/// Emits each submission as a structured tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MetricSink for LogSink {
    fn submit_gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        hostname: Option<&str>,
    ) -> AmbariResult<()> {
        let metric = format!("{METRIC_NAMESPACE}.{name}");
        info!(
            metric = %metric,
            value = value,
            tags = %tags.join(","),
            hostname = hostname,
            "📈 GAUGE"
        );
        Ok(())
    }

    fn submit_service_check(
        &self,
        name: &str,
        status: CheckStatus,
        tags: &[String],
    ) -> AmbariResult<()> {
        let check = format!("{METRIC_NAMESPACE}.{name}");
        info!(
            check = %check,
            status = %status,
            code = status.code(),
            tags = %tags.join(","),
            "🩺 SERVICE_CHECK"
        );
        Ok(())
    }
}

/// Writes one JSON document per submission to the wrapped writer
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write(&self, submission: &Submission) -> AmbariResult<()> {
        let line = serde_json::to_string(&submission.to_json())?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}").map_err(|e| AmbariError::sink(e.to_string()))
    }
}

impl<W: Write + Send> MetricSink for JsonLinesSink<W> {
    fn submit_gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        hostname: Option<&str>,
    ) -> AmbariResult<()> {
        self.write(&Submission::gauge(name, value, tags, hostname))
    }

    fn submit_service_check(
        &self,
        name: &str,
        status: CheckStatus,
        tags: &[String],
    ) -> AmbariResult<()> {
        self.write(&Submission::service_check(name, status, tags))
    }
}
