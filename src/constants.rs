//! # Ambari Constants
//!
//! Endpoint templates, tag keys, metric names and the service state lookup
//! table that define how Ambari responses map onto submitted metrics.

use std::fmt;

/// Namespace prepended to every metric and service check at the output boundary
pub const METRIC_NAMESPACE: &str = "ambari";

/// REST paths relative to the configured base endpoint
pub mod endpoints {
    pub const API_ROOT: &str = "/api/v1";
    pub const HOST_METRICS_QUERY: &str = "?fields=metrics";
    pub const COMPONENT_METRICS_QUERY: &str = "/components?fields=metrics";
    pub const SERVICE_INFO_QUERY: &str = "?fields=ServiceInfo";

    /// `{base}/api/v1/clusters`
    pub fn clusters_url(base_url: &str) -> String {
        format!("{base_url}{API_ROOT}/clusters")
    }

    /// `{base}/api/v1/clusters/{cluster}/hosts?fields=metrics`
    pub fn hosts_url(base_url: &str, cluster: &str) -> String {
        format!("{}/{cluster}/hosts{HOST_METRICS_QUERY}", clusters_url(base_url))
    }

    /// `{base}/api/v1/clusters/{cluster}/services/{service}`
    pub fn service_url(base_url: &str, cluster: &str, service: &str) -> String {
        format!("{}/{cluster}/services/{service}", clusters_url(base_url))
    }

    /// `{base}/api/v1/clusters/{cluster}/services/{service}/components?fields=metrics`
    pub fn component_metrics_url(base_url: &str, cluster: &str, service: &str) -> String {
        format!(
            "{}{COMPONENT_METRICS_QUERY}",
            service_url(base_url, cluster, service)
        )
    }

    /// `{base}/api/v1/clusters/{cluster}/services/{service}?fields=ServiceInfo`
    pub fn service_info_url(base_url: &str, cluster: &str, service: &str) -> String {
        format!("{}{SERVICE_INFO_QUERY}", service_url(base_url, cluster, service))
    }
}

/// Keys of the Ambari JSON documents we traverse
pub mod fields {
    pub const ITEMS: &str = "items";
    pub const METRICS: &str = "metrics";
    pub const CLUSTERS: &str = "Clusters";
    pub const CLUSTER_NAME: &str = "cluster_name";
    pub const HOSTS: &str = "Hosts";
    pub const HOST_NAME: &str = "host_name";
    pub const SERVICE_COMPONENT_INFO: &str = "ServiceComponentInfo";
    pub const COMPONENT_NAME: &str = "component_name";
    pub const SERVICE_INFO: &str = "ServiceInfo";
    pub const STATE: &str = "state";
}

/// Tag keys and constructors for the `key:value` tag strings
pub mod tags {
    pub const CLUSTER: &str = "ambari_cluster";
    pub const SERVICE: &str = "ambari_service";
    pub const COMPONENT: &str = "ambari_component";
    pub const URL: &str = "url";

    pub fn cluster_tag(cluster: &str) -> String {
        format!("{CLUSTER}:{cluster}")
    }

    pub fn service_tag(service: &str) -> String {
        format!("{SERVICE}:{}", service.to_lowercase())
    }

    pub fn component_tag(component: &str) -> String {
        format!("{COMPONENT}:{}", component.to_lowercase())
    }

    pub fn url_tag(url: &str) -> String {
        format!("{URL}:{url}")
    }
}

/// Service check names (un-namespaced)
pub mod service_checks {
    pub const CAN_CONNECT: &str = "can_connect";
    pub const STATE: &str = "state";
}

/// Status reported with a service check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl CheckStatus {
    /// Integer code used by the metrics backend
    pub fn code(&self) -> u8 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Critical => 2,
            CheckStatus::Unknown => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Critical => "critical",
            CheckStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ambari service lifecycle state, as reported in `ServiceInfo.state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Init,
    Installing,
    InstallFailed,
    Installed,
    Starting,
    Started,
    Stopping,
    Uninstalling,
    Uninstalled,
    WipingOut,
    Upgrading,
    Disabled,
    Unknown,
}

impl ServiceState {
    /// Parse Ambari's textual state. Unrecognised text is `Unknown`.
    pub fn parse(state: &str) -> Self {
        match state {
            "INIT" => ServiceState::Init,
            "INSTALLING" => ServiceState::Installing,
            "INSTALL_FAILED" => ServiceState::InstallFailed,
            "INSTALLED" => ServiceState::Installed,
            "STARTING" => ServiceState::Starting,
            "STARTED" => ServiceState::Started,
            "STOPPING" => ServiceState::Stopping,
            "UNINSTALLING" => ServiceState::Uninstalling,
            "UNINSTALLED" => ServiceState::Uninstalled,
            "WIPING_OUT" => ServiceState::WipingOut,
            "UPGRADING" => ServiceState::Upgrading,
            "DISABLED" => ServiceState::Disabled,
            _ => ServiceState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Init => "INIT",
            ServiceState::Installing => "INSTALLING",
            ServiceState::InstallFailed => "INSTALL_FAILED",
            ServiceState::Installed => "INSTALLED",
            ServiceState::Starting => "STARTING",
            ServiceState::Started => "STARTED",
            ServiceState::Stopping => "STOPPING",
            ServiceState::Uninstalling => "UNINSTALLING",
            ServiceState::Uninstalled => "UNINSTALLED",
            ServiceState::WipingOut => "WIPING_OUT",
            ServiceState::Upgrading => "UPGRADING",
            ServiceState::Disabled => "DISABLED",
            ServiceState::Unknown => "UNKNOWN",
        }
    }

    /// Fixed state → check status table
    pub fn check_status(&self) -> CheckStatus {
        match self {
            ServiceState::Init
            | ServiceState::Installing
            | ServiceState::Starting
            | ServiceState::Started
            | ServiceState::Stopping
            | ServiceState::Uninstalling
            | ServiceState::WipingOut
            | ServiceState::Upgrading => CheckStatus::Ok,
            ServiceState::Installed | ServiceState::Uninstalled | ServiceState::Disabled => {
                CheckStatus::Warning
            }
            ServiceState::InstallFailed => CheckStatus::Critical,
            ServiceState::Unknown => CheckStatus::Unknown,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
