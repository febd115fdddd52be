#![allow(clippy::doc_markdown)] // Allow technical terms like Ambari, HDFS in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Ambari Check
//!
//! Polls the Apache Ambari REST management API of a Hadoop cluster and
//! republishes what it finds as gauges and service checks.
//!
//! ## Overview
//!
//! A check cycle is a fixed, sequential walk of four endpoints:
//!
//! - `/api/v1/clusters` to discover clusters
//! - `/api/v1/clusters/{cluster}/hosts?fields=metrics` for host resource usage
//! - `/api/v1/clusters/{cluster}/services/{service}/components?fields=metrics`
//!   for per-component metrics
//! - `/api/v1/clusters/{cluster}/services/{service}?fields=ServiceInfo` for
//!   service health
//!
//! Nested metric payloads are flattened into dotted names and tagged with
//! `ambari_cluster`, `ambari_service` and `ambari_component` context. Nothing
//! is kept between cycles.
//!
//! ## Module Organization
//!
//! - [`flatten`] - Metric tree flattening
//! - [`poller`] - The API walk and tag construction
//! - [`client`] - Injected request capability and its reqwest implementation
//! - [`sink`] - Injected submission capability and bundled sinks
//! - [`config`] - YAML configuration management
//! - [`constants`] - Endpoints, tags, and the service state table
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ambari_check::{AmbariConfig, AmbariPoller, HttpAmbariClient, LogSink};
//!
//! # async fn example() -> ambari_check::AmbariResult<()> {
//! let config = AmbariConfig {
//!     url: "http://ambari.example.com:8080".to_string(),
//!     username: "admin".to_string(),
//!     password: "admin".to_string(),
//!     ..Default::default()
//! };
//!
//! let client = HttpAmbariClient::new(config.timeout_ms)?;
//! let poller = AmbariPoller::new(client, LogSink, config);
//! let summary = poller.check().await?;
//! println!("Polled {} clusters", summary.clusters.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod poller;
pub mod sink;

pub use client::{AmbariApi, Credentials, HttpAmbariClient};
pub use config::{AmbariConfig, ConfigManager, ConfigurationError, ServiceConfig};
pub use constants::{CheckStatus, ServiceState, METRIC_NAMESPACE};
pub use error::{AmbariError, AmbariResult};
pub use flatten::{flatten_host_metrics, flatten_service_metrics, FlatMetrics, MetricTree};
pub use poller::{AmbariPoller, CheckSummary, ServiceCheckInfo};
pub use sink::{JsonLinesSink, LogSink, MetricSink, RecordingSink, Submission};
