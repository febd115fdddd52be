//! # Metric Flattening
//!
//! Collapses the nested metric payloads returned by Ambari into flat,
//! dot-separated metric names.
//!
//! Only the caller-supplied prefix and the innermost leaf key survive in a
//! flattened name; intermediate keys are discarded:
//!
//! ```rust
//! use ambari_check::flatten::flatten_service_metrics;
//! use serde_json::json;
//!
//! let flat = flatten_service_metrics(&json!({"c": {"d": "x"}, "a": 1}), "p");
//! assert_eq!(serde_json::Value::Object(flat), json!({"p.d": "x", "p.a": 1}));
//! ```
//!
//! Traversal is depth-first in response key order. When two leaves produce the
//! same name the later one wins, keeping the position of the first.

use serde_json::Value;

/// Flattened metrics keyed by dotted name, in first-insertion order
pub type FlatMetrics = serde_json::Map<String, Value>;

/// A metric payload: either a leaf value or a mapping of named subtrees
#[derive(Debug, Clone, PartialEq)]
pub enum MetricTree {
    /// Any non-mapping JSON value, kept verbatim
    Leaf(Value),
    /// Named children in response order
    Node(Vec<(String, MetricTree)>),
}

impl MetricTree {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => MetricTree::Node(
                map.iter()
                    .map(|(key, child)| (key.clone(), MetricTree::from_value(child)))
                    .collect(),
            ),
            other => MetricTree::Leaf(other.clone()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MetricTree::Leaf(_))
    }

    /// Number of leaves reachable from this tree
    pub fn leaf_count(&self) -> usize {
        match self {
            MetricTree::Leaf(_) => 1,
            MetricTree::Node(children) => children.iter().map(|(_, c)| c.leaf_count()).sum(),
        }
    }

    /// Flatten every leaf to `{prefix}.{leaf_key}`.
    ///
    /// A root that is itself a leaf has no key and yields nothing.
    pub fn flatten(&self, prefix: &str) -> FlatMetrics {
        let mut flat = FlatMetrics::new();
        self.flatten_into(prefix, &mut flat);
        flat
    }

    fn flatten_into(&self, prefix: &str, flat: &mut FlatMetrics) {
        let MetricTree::Node(children) = self else {
            return;
        };

        for (key, child) in children {
            match child {
                MetricTree::Leaf(value) => {
                    flat.insert(metric_name(prefix, key), value.clone());
                }
                MetricTree::Node(_) => child.flatten_into(prefix, flat),
            }
        }
    }
}

impl From<Value> for MetricTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => MetricTree::Node(
                map.into_iter()
                    .map(|(key, child)| (key, MetricTree::from(child)))
                    .collect(),
            ),
            other => MetricTree::Leaf(other),
        }
    }
}

/// Join a prefix and a leaf key. An empty prefix yields the bare key.
pub fn metric_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Flatten a service/component metric subtree under `prefix`
pub fn flatten_service_metrics(metrics: &Value, prefix: &str) -> FlatMetrics {
    MetricTree::from_value(metrics).flatten(prefix)
}

/// Flatten a host `metrics` object.
///
/// Each top-level category (`cpu`, `disk`, `load`, `memory`, `network`,
/// `process`, ...) is flattened under its own name and merged into one
/// mapping. Top-level scalars such as `boottime` are kept under their own,
/// unprefixed name.
pub fn flatten_host_metrics(metrics: &Value) -> FlatMetrics {
    let mut flat = FlatMetrics::new();

    let MetricTree::Node(categories) = MetricTree::from_value(metrics) else {
        return flat;
    };

    for (category, tree) in categories {
        match tree {
            MetricTree::Leaf(value) => {
                flat.insert(category, value);
            }
            node @ MetricTree::Node(_) => node.flatten_into(&category, &mut flat),
        }
    }

    flat
}
