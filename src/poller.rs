//! # Ambari Poller
//!
//! Walks the Ambari REST API (clusters → hosts/services → components) and
//! turns each response into gauges and service checks.
//!
//! Every operation is a stateless request/transform/submit: requests are
//! issued strictly in sequence, nothing is cached between calls, and any
//! transport or response-shape error propagates to the caller unchanged.
//! The only tolerated gaps are hosts or components without a `metrics`
//! object, non-whitelisted components or metrics, and non-numeric values;
//! those are skipped.

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{AmbariApi, Credentials};
use crate::config::AmbariConfig;
use crate::constants::{endpoints, fields, service_checks, tags, CheckStatus, ServiceState};
use crate::error::{AmbariError, AmbariResult};
use crate::flatten::{flatten_host_metrics, flatten_service_metrics};
use crate::logging::{log_error, log_poll_operation};
use crate::sink::MetricSink;

fn serialize_status_code<S: Serializer>(
    status: &CheckStatus,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(status.code())
}

/// Health of one service, ready for submission as a service check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCheckInfo {
    #[serde(serialize_with = "serialize_status_code")]
    pub state: CheckStatus,
    pub tags: Vec<String>,
}

/// Counters for one host metrics pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostMetricsSummary {
    pub hosts_seen: usize,
    pub hosts_without_metrics: usize,
    pub gauges_submitted: usize,
}

/// Counters for one service status/metrics pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub services_polled: usize,
    pub gauges_submitted: usize,
    pub service_checks_submitted: usize,
}

/// Result of a full check cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub clusters: Vec<String>,
    pub hosts: HostMetricsSummary,
    pub services: ServiceSummary,
}

impl CheckSummary {
    pub fn gauges_submitted(&self) -> usize {
        self.hosts.gauges_submitted + self.services.gauges_submitted
    }
}

/// Polls one Ambari server through an injected API and submits to an injected sink
pub struct AmbariPoller<A, S> {
    api: A,
    sink: S,
    config: AmbariConfig,
}

impl<A: AmbariApi, S: MetricSink> AmbariPoller<A, S> {
    pub fn new(api: A, sink: S, config: AmbariConfig) -> Self {
        Self { api, sink, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &AmbariConfig {
        &self.config
    }

    /// Run one full check cycle against the configured server
    pub async fn check(&self) -> AmbariResult<CheckSummary> {
        let endpoint = self.config.base_url();
        let auth = self.config.credentials();

        let mut can_connect_tags = self.config.tags.clone();
        can_connect_tags.push(tags::url_tag(endpoint));

        let clusters = match self.get_clusters(endpoint, &auth).await {
            Ok(clusters) => {
                self.sink.submit_service_check(
                    service_checks::CAN_CONNECT,
                    CheckStatus::Ok,
                    &can_connect_tags,
                )?;
                clusters
            }
            Err(e) => {
                log_error("poller", "get_clusters", &e.to_string(), Some(endpoint));
                if let Err(sink_error) = self.sink.submit_service_check(
                    service_checks::CAN_CONNECT,
                    CheckStatus::Critical,
                    &can_connect_tags,
                ) {
                    log_error(
                        "poller",
                        "submit_service_check",
                        &sink_error.to_string(),
                        Some(service_checks::CAN_CONNECT),
                    );
                }
                return Err(e);
            }
        };

        let mut summary = CheckSummary {
            clusters: clusters.clone(),
            ..Default::default()
        };

        if self.config.collect_host_metrics {
            summary.hosts = self.get_host_metrics(endpoint, &auth, &clusters).await?;
        }

        if self.config.collect_service_metrics || self.config.collect_service_status {
            summary.services = self
                .get_service_status_and_metrics(endpoint, &auth, &clusters)
                .await?;
        }

        info!(
            clusters = summary.clusters.len(),
            hosts = summary.hosts.hosts_seen,
            gauges = summary.gauges_submitted(),
            service_checks = summary.services.service_checks_submitted,
            "Ambari check cycle complete"
        );

        Ok(summary)
    }

    /// Names of all clusters managed by the server, in response order
    pub async fn get_clusters(
        &self,
        endpoint: &str,
        auth: &Credentials,
    ) -> AmbariResult<Vec<String>> {
        let url = endpoints::clusters_url(endpoint);
        let response = self.api.request(&url, auth).await?;

        let clusters = items(&response)?
            .iter()
            .map(|item| {
                nested_str(item, fields::CLUSTERS, fields::CLUSTER_NAME)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AmbariError::invalid_response(
                            "Clusters.cluster_name",
                            format!("missing from cluster item in {url}"),
                        )
                    })
            })
            .collect::<AmbariResult<Vec<_>>>()?;

        log_poll_operation("get_clusters", None, None, "ok", Some(&clusters.join(",")));
        Ok(clusters)
    }

    /// Raw host items for a cluster, each optionally carrying `metrics`
    pub async fn get_hosts_info(
        &self,
        endpoint: &str,
        auth: &Credentials,
        cluster: &str,
    ) -> AmbariResult<Vec<Value>> {
        let url = endpoints::hosts_url(endpoint, cluster);
        let response = self.api.request(&url, auth).await?;
        Ok(items(&response)?.clone())
    }

    /// Flatten and submit every host's metrics for each cluster
    pub async fn get_host_metrics(
        &self,
        endpoint: &str,
        auth: &Credentials,
        clusters: &[String],
    ) -> AmbariResult<HostMetricsSummary> {
        let mut summary = HostMetricsSummary::default();

        for cluster in clusters {
            let mut host_tags = self.config.tags.clone();
            host_tags.push(tags::cluster_tag(cluster));

            for host in self.get_hosts_info(endpoint, auth, cluster).await? {
                summary.hosts_seen += 1;
                let hostname = nested_str(&host, fields::HOSTS, fields::HOST_NAME);

                let Some(host_metrics) = metrics_of(&host) else {
                    warn!(cluster = %cluster, hostname = hostname, "No metrics received for host");
                    summary.hosts_without_metrics += 1;
                    continue;
                };

                for (metric_name, value) in flatten_host_metrics(host_metrics) {
                    match value.as_f64() {
                        Some(number) => {
                            self.sink
                                .submit_gauge(&metric_name, number, &host_tags, hostname)?;
                            summary.gauges_submitted += 1;
                        }
                        None => warn!(
                            metric = %metric_name,
                            hostname = hostname,
                            "Expected a numeric value, got {}",
                            value
                        ),
                    }
                }
            }

            log_poll_operation("get_host_metrics", Some(cluster.as_str()), None, "ok", None);
        }

        Ok(summary)
    }

    /// Poll component metrics and service state for every configured service
    pub async fn get_service_status_and_metrics(
        &self,
        endpoint: &str,
        auth: &Credentials,
        clusters: &[String],
    ) -> AmbariResult<ServiceSummary> {
        let mut summary = ServiceSummary::default();

        for cluster in clusters {
            let mut cluster_tags = self.config.tags.clone();
            cluster_tags.push(tags::cluster_tag(cluster));

            for (service, service_config) in &self.config.services {
                summary.services_polled += 1;
                let mut service_tags = cluster_tags.clone();
                service_tags.push(tags::service_tag(service));

                if self.config.collect_service_metrics {
                    summary.gauges_submitted += self
                        .get_component_metrics(
                            endpoint,
                            auth,
                            cluster,
                            service,
                            &service_tags,
                            &service_config.component_whitelist(),
                            &service_config.metric_headers,
                        )
                        .await?;
                }

                if self.config.collect_service_status {
                    let service_info = self
                        .get_service_checks_info(endpoint, auth, cluster, service, &service_tags)
                        .await?;
                    for info in service_info {
                        self.sink
                            .submit_service_check(service_checks::STATE, info.state, &info.tags)?;
                        summary.service_checks_submitted += 1;
                    }
                }

                log_poll_operation(
                    "get_service_status_and_metrics",
                    Some(cluster.as_str()),
                    Some(service.as_str()),
                    "ok",
                    None,
                );
            }
        }

        Ok(summary)
    }

    /// Submit the whitelisted metrics of whitelisted components.
    ///
    /// Every metric category is flattened under its own name (`cpu` yields
    /// `cpu.cpu_idle`, `cpu.cpu_idle._avg`, ...) in response order, and a
    /// metric is kept when its name contains any `metric_whitelist` entry.
    /// Matching is case-sensitive. The `._avg/._max/._min/._sum` aggregates
    /// are sibling keys supplied by Ambari. Returns the number of gauges
    /// submitted.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_component_metrics(
        &self,
        endpoint: &str,
        auth: &Credentials,
        cluster: &str,
        service: &str,
        base_tags: &[String],
        component_whitelist: &[String],
        metric_whitelist: &[String],
    ) -> AmbariResult<usize> {
        let url = endpoints::component_metrics_url(endpoint, cluster, service);
        let response = self.api.request(&url, auth).await?;
        let mut submitted = 0;

        for component in items(&response)? {
            let component_name =
                nested_str(component, fields::SERVICE_COMPONENT_INFO, fields::COMPONENT_NAME)
                    .ok_or_else(|| {
                        AmbariError::invalid_response(
                            "ServiceComponentInfo.component_name",
                            format!("missing from component item in {url}"),
                        )
                    })?;

            if !component_whitelist.iter().any(|c| c == component_name) {
                continue;
            }

            let Some(component_metrics) = metrics_of(component).and_then(Value::as_object) else {
                debug!(component = component_name, "No metrics found for component");
                continue;
            };

            let mut component_tags = base_tags.to_vec();
            component_tags.push(tags::component_tag(component_name));

            for (category_name, category) in component_metrics {
                for (metric_name, value) in flatten_service_metrics(category, category_name) {
                    if !is_whitelisted(&metric_name, metric_whitelist) {
                        continue;
                    }
                    if let Some(number) = value.as_f64() {
                        self.sink
                            .submit_gauge(&metric_name, number, &component_tags, None)?;
                        submitted += 1;
                    }
                }
            }
        }

        Ok(submitted)
    }

    /// Map the service's `ServiceInfo.state` to a check status
    pub async fn get_service_checks_info(
        &self,
        endpoint: &str,
        auth: &Credentials,
        cluster: &str,
        service: &str,
        service_tags: &[String],
    ) -> AmbariResult<Vec<ServiceCheckInfo>> {
        let url = endpoints::service_info_url(endpoint, cluster, service);
        let response = self.api.request(&url, auth).await?;

        let state = nested_str(&response, fields::SERVICE_INFO, fields::STATE).ok_or_else(|| {
            AmbariError::invalid_response("ServiceInfo.state", format!("missing from {url}"))
        })?;
        let state = ServiceState::parse(state);
        debug!(service = service, state = %state, "Service state");

        Ok(vec![ServiceCheckInfo {
            state: state.check_status(),
            tags: service_tags.to_vec(),
        }])
    }
}

/// The top-level `items` array of a collection response
fn items(response: &Value) -> AmbariResult<&Vec<Value>> {
    response
        .get(fields::ITEMS)
        .and_then(Value::as_array)
        .ok_or_else(|| AmbariError::invalid_response(fields::ITEMS, "expected an array"))
}

/// The item's `metrics` object, treating an explicit `null` as absent
fn metrics_of(item: &Value) -> Option<&Value> {
    item.get(fields::METRICS).filter(|metrics| !metrics.is_null())
}

fn is_whitelisted(metric_name: &str, metric_whitelist: &[String]) -> bool {
    metric_whitelist
        .iter()
        .any(|entry| metric_name.contains(entry.as_str()))
}

/// `value[outer][inner]` as a string
fn nested_str<'a>(value: &'a Value, outer: &str, inner: &str) -> Option<&'a str> {
    value.get(outer)?.get(inner)?.as_str()
}
