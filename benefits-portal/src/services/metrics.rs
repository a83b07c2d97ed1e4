use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

use crate::navigation::PageId;

/// Portal collectors and the registry that exports them.
pub struct PortalMetrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    navigations_total: IntCounterVec,
    storage_failures_total: IntCounterVec,
}

// Global registry
static METRICS: OnceLock<PortalMetrics> = OnceLock::new();

impl PortalMetrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;
        let navigations_total = IntCounterVec::new(
            Opts::new("portal_navigations_total", "Page switches by target page"),
            &["page"],
        )?;
        let storage_failures_total = IntCounterVec::new(
            Opts::new(
                "portal_storage_failures_total",
                "Persistent store operations that failed and were ignored",
            ),
            &["operation"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(navigations_total.clone()))?;
        registry.register(Box::new(storage_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            navigations_total,
            storage_failures_total,
        })
    }
}

/// Create and register the portal collectors. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_none() {
        // A concurrent initializer may win the race; its collectors are used.
        let _ = METRICS.set(PortalMetrics::new()?);
    }
    Ok(())
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let Some(metrics) = METRICS.get() else {
        return;
    };
    let status = status.to_string();
    let labels = [method, path, status.as_str()];

    metrics.http_requests_total.with_label_values(&labels).inc();
    metrics
        .http_request_duration_seconds
        .with_label_values(&labels)
        .observe(duration_secs);
}

pub fn record_navigation(page: PageId) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .navigations_total
            .with_label_values(&[page.as_str()])
            .inc();
    }
}

pub fn record_storage_failure(operation: &str) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .storage_failures_total
            .with_label_values(&[operation])
            .inc();
    }
}

pub fn get_metrics() -> anyhow::Result<String> {
    let metrics = METRICS
        .get()
        .ok_or_else(|| anyhow::anyhow!("metrics registry not initialized"))?;

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    encoder.encode(&metrics.registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_counter_is_exported() {
        init_metrics().unwrap();
        init_metrics().unwrap();

        record_navigation(PageId::Claims);
        record_storage_failure("set");

        let output = get_metrics().unwrap();
        assert!(output.contains("portal_navigations_total{page=\"claims\"}"));
        assert!(output.contains("portal_storage_failures_total{operation=\"set\"}"));
    }
}
