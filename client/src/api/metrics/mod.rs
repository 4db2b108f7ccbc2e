//! Operational metrics from the actuator endpoints.
//!
//! Each metric fetch is best-effort: a missing or unreadable metric reads
//! as zero so the dashboard renders with whatever the backend exposes. The
//! snapshot fans all fetches out concurrently.

use crate::client::{ApiClient, RequestOptions};
use futures::future::join_all;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MetricMeasurement {
    pub statistic: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricResponse {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_unit: Option<String>,
    pub measurements: Vec<MetricMeasurement>,
}

/// One dashboard snapshot assembled from the fixed actuator metric set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SystemMetrics {
    pub jvm_memory_used: f64,
    pub jvm_memory_max: f64,
    pub http_requests_count: f64,
    pub http_requests_time: f64,
    pub db_connections_active: f64,
    pub db_connections_idle: f64,
    pub db_connections_max: f64,
    pub app_startup_time: f64,
    pub disk_free: f64,
    pub disk_total: f64,
    pub threads_live: f64,
    pub cpu_usage: f64,
}

/// Metrics endpoints, borrowing the shared client.
pub struct MetricsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MetricsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /actuator/metrics/{name}`, best-effort.
    pub async fn metric(&self, name: &str) -> Option<MetricResponse> {
        match self
            .client
            .get(
                &format!("/actuator/metrics/{}", name),
                RequestOptions::skip_auth(),
            )
            .await
        {
            Ok(metric) => Some(metric),
            Err(e) => {
                debug!("Metric {} unavailable: {}", name, e);
                None
            }
        }
    }

    /// Fetches the whole dashboard snapshot concurrently. Metrics the
    /// backend does not expose read as zero.
    pub async fn system_metrics(&self) -> SystemMetrics {
        let names = [
            "jvm.memory.used",
            "jvm.memory.max",
            "http.server.requests",
            "hikaricp.connections.active",
            "hikaricp.connections.idle",
            "hikaricp.connections.max",
            "application.started.time",
            "disk.free",
            "disk.total",
            "jvm.threads.live",
            "process.cpu.usage",
        ];
        let results = join_all(names.iter().map(|name| self.metric(name))).await;

        let [
            memory_used,
            memory_max,
            http_requests,
            db_active,
            db_idle,
            db_max,
            app_startup,
            disk_free,
            disk_total,
            threads,
            cpu,
        ] = results.as_slice()
        else {
            unreachable!("join_all preserves input arity");
        };

        SystemMetrics {
            jvm_memory_used: statistic_value(memory_used, "VALUE"),
            jvm_memory_max: statistic_value(memory_max, "VALUE"),
            http_requests_count: statistic_value(http_requests, "COUNT"),
            http_requests_time: statistic_value(http_requests, "TOTAL_TIME"),
            db_connections_active: statistic_value(db_active, "VALUE"),
            db_connections_idle: statistic_value(db_idle, "VALUE"),
            db_connections_max: statistic_value(db_max, "VALUE"),
            app_startup_time: statistic_value(app_startup, "VALUE"),
            disk_free: statistic_value(disk_free, "VALUE"),
            disk_total: statistic_value(disk_total, "VALUE"),
            threads_live: statistic_value(threads, "VALUE"),
            cpu_usage: statistic_value(cpu, "VALUE"),
        }
    }
}

/// Pulls one statistic out of a metric, zero when the metric or statistic
/// is absent.
fn statistic_value(metric: &Option<MetricResponse>, statistic: &str) -> f64 {
    metric
        .as_ref()
        .and_then(|m| {
            m.measurements
                .iter()
                .find(|measurement| measurement.statistic == statistic)
        })
        .map(|measurement| measurement.value)
        .unwrap_or(0.0)
}
