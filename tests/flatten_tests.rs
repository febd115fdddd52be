//! Flattening regression tests against recorded Ambari payloads.

mod common;

use ambari_check::{flatten_host_metrics, flatten_service_metrics};
use common::{fixture, COMPONENT_METRICS, HOST_METRICS};
use serde_json::{json, Value};

#[test]
fn test_flatten_service_metrics() {
    let metrics = flatten_service_metrics(
        &json!({
            "metric_a": 10,
            "metric_b": 15,
            "metric_c": {"submetric_c": "hello"},
            "metric_d": {"submetric_d": {"subsub_d": 25}}
        }),
        "pfx",
    );

    assert_eq!(
        Value::Object(metrics),
        json!({
            "pfx.metric_a": 10,
            "pfx.metric_b": 15,
            "pfx.submetric_c": "hello",
            "pfx.subsub_d": 25
        })
    );
}

#[test]
fn test_flatten_host_metrics() {
    let metrics = flatten_host_metrics(&fixture(HOST_METRICS));

    assert_eq!(
        Value::Object(metrics),
        json!({
            "boottime": 1555934503.0,
            "cpu.cpu_idle": 62.8,
            "cpu.cpu_nice": 0.0,
            "cpu.cpu_num": 4.0,
            "cpu.cpu_system": 5.1,
            "cpu.cpu_user": 32.0,
            "cpu.cpu_wio": 0.0,
            "disk.disk_free": 124.35,
            "disk.disk_total": 148.29,
            "disk.read_bytes": 1594053632.0,
            "disk.read_count": 42717.0,
            "disk.read_time": 240986.0,
            "disk.write_bytes": 117000843264.0,
            "disk.write_count": 499318.0,
            "disk.write_time": 5946304.0,
            "load.load_fifteen": 0.99,
            "load.load_five": 1.35,
            "load.load_one": 0.57,
            "memory.mem_cached": 3554248.0,
            "memory.mem_free": 11327848.0,
            "memory.mem_shared": 0.0,
            "memory.mem_total": 15399208.0,
            "memory.swap_free": 0.0,
            "memory.swap_total": 0.0,
            "network.bytes_in": 683.2346950556641,
            "network.bytes_out": 12517.203580542699,
            "network.pkts_in": 8.499187630576825,
            "network.pkts_out": 10.498996484830196,
            "process.proc_run": 0.0,
            "process.proc_total": 128.0
        })
    );
}

#[test]
fn test_flatten_component_category_keeps_aggregate_suffixes() {
    let components = fixture(COMPONENT_METRICS);
    let namenode_cpu = &components["items"][2]["metrics"]["cpu"];

    let metrics = flatten_service_metrics(namenode_cpu, "cpu");
    let names: Vec<&str> = metrics.keys().map(String::as_str).take(5).collect();

    assert_eq!(metrics.len(), 25);
    assert_eq!(
        names,
        vec![
            "cpu.cpu_idle",
            "cpu.cpu_idle._avg",
            "cpu.cpu_idle._max",
            "cpu.cpu_idle._min",
            "cpu.cpu_idle._sum"
        ]
    );
}

#[test]
fn test_flatten_nested_component_category_drops_intermediate_keys() {
    let components = fixture(COMPONENT_METRICS);
    let namenode_dfs = &components["items"][2]["metrics"]["dfs"];

    let metrics = flatten_service_metrics(namenode_dfs, "dfs");

    assert_eq!(
        Value::Object(metrics),
        json!({
            "dfs.CapacityRemaining": 123456789.0,
            "dfs.HAState": "active",
            "dfs.SafeMode": "",
            "dfs.TotalFiles": 1042.0
        })
    );
}
