use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, Mutex, atomic::AtomicU64},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::warn;

const COLLECT_EVERY: Duration = Duration::from_secs(15);

/// Process gauges sampled by [`run_metrics_collector`].
#[derive(Debug)]
pub struct SystemMetrics {
    pub resident_bytes: Gauge,
    pub virtual_bytes: Gauge,
    pub host_available_bytes: Gauge,
    pub threads: Gauge,
    pub cpu_percent: Gauge<f64, AtomicU64>,
    pub start_time_seconds: Gauge,
    pid: Pid,
    system: Mutex<System>,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMetrics {
    pub fn new() -> Self {
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let metrics = Self {
            resident_bytes: Gauge::default(),
            virtual_bytes: Gauge::default(),
            host_available_bytes: Gauge::default(),
            threads: Gauge::default(),
            cpu_percent: Gauge::default(),
            start_time_seconds: Gauge::default(),
            pid: Pid::from_u32(std::process::id()),
            system: Mutex::new(System::new()),
        };
        metrics.start_time_seconds.set(started);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "process_resident_memory_bytes",
            "Resident memory of the inventory process",
            self.resident_bytes.clone(),
        );
        registry.register(
            "process_virtual_memory_bytes",
            "Virtual memory of the inventory process",
            self.virtual_bytes.clone(),
        );
        registry.register(
            "host_available_memory_bytes",
            "Memory available on the host",
            self.host_available_bytes.clone(),
        );
        registry.register(
            "process_threads",
            "OS threads owned by the process",
            self.threads.clone(),
        );
        registry.register(
            "process_cpu_percent",
            "CPU usage of the process since the previous sample",
            self.cpu_percent.clone(),
        );
        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.start_time_seconds.clone(),
        );
    }

    /// Takes one sample. CPU usage is relative to the previous call, so the
    /// first sample after start reads zero.
    pub fn refresh(&self) {
        let Ok(mut sys) = self.system.lock() else {
            warn!("system metrics lock poisoned, skipping sample");
            return;
        };

        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu().with_tasks(),
        );

        self.host_available_bytes.set(sys.available_memory() as i64);

        if let Some(process) = sys.process(self.pid) {
            self.resident_bytes.set(process.memory() as i64);
            self.virtual_bytes.set(process.virtual_memory() as i64);
            self.cpu_percent.set(f64::from(process.cpu_usage()));
            if let Some(tasks) = process.tasks() {
                self.threads.set(tasks.len() as i64);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry, prefix: &str) {
        registry.register(
            format!("{prefix}_requests"),
            "Total service operations by method and outcome",
            self.request_counter.clone(),
        );
        registry.register(
            format!("{prefix}_request_duration_seconds"),
            "Service operation latency in seconds",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut interval = tokio::time::interval(COLLECT_EVERY);
    loop {
        interval.tick().await;
        let sampler = system_metrics.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || sampler.refresh()).await {
            warn!("system metrics sample failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn recorded_requests_show_up_in_the_registry() {
        let metrics = Metrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry, "inventory");

        metrics.record(Method::Get, Status::Success, 0.02);
        metrics.record(Method::Get, Status::Success, 0.03);
        metrics.record(Method::Delete, Status::Error, 0.5);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();

        assert!(out.contains("inventory_requests_total{method=\"Get\",status=\"Success\"} 2"));
        assert!(out.contains("inventory_requests_total{method=\"Delete\",status=\"Error\"} 1"));
        assert!(out.contains("inventory_request_duration_seconds"));
    }

    #[test]
    fn system_sample_reports_this_process() {
        let system = SystemMetrics::new();
        system.refresh();

        assert!(system.resident_bytes.get() > 0);
        assert!(system.start_time_seconds.get() > 0);
    }
}
