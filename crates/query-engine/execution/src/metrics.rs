//! Metrics setup and update for our connector.

use prometheus::{IntCounter, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    query_total: IntCounter,
    query_target_total: IntCounter,
    backend_request_total: IntCounter,
    backend_request_failure_total: IntCounter,
    health_check_total: IntCounter,
    health_check_failure_total: IntCounter,
}

impl Metrics {
    /// Set up counters and gauges used to produce Prometheus metrics
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_query_total",
            "Total successful queries.",
        )?;

        let query_target_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_query_target_total",
            "Total query targets executed, including those whose result is not returned.",
        )?;

        let backend_request_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_backend_request_total",
            "Total requests sent to the graph API.",
        )?;

        let backend_request_failure_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_backend_request_failure_total",
            "Total requests to the graph API that failed or returned an error status.",
        )?;

        let health_check_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_health_check_total",
            "Total connection tests.",
        )?;

        let health_check_failure_total = add_int_counter_metric(
            metrics_registry,
            "nodegraph_health_check_failure_total",
            "Total connection tests that reported an error.",
        )?;

        Ok(Self {
            query_total,
            query_target_total,
            backend_request_total,
            backend_request_failure_total,
            health_check_total,
            health_check_failure_total,
        })
    }

    pub fn record_successful_query(&self) {
        self.query_total.inc();
    }

    pub fn record_query_target(&self) {
        self.query_target_total.inc();
    }

    pub fn record_backend_request(&self, succeeded: bool) {
        self.backend_request_total.inc();
        if !succeeded {
            self.backend_request_failure_total.inc();
        }
    }

    pub fn record_health_check(&self, succeeded: bool) {
        self.health_check_total.inc();
        if !succeeded {
            self.health_check_failure_total.inc();
        }
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter =
        IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_failures_separately() {
        let mut registry = Registry::new();
        let metrics = Metrics::initialize(&mut registry).unwrap();

        metrics.record_backend_request(true);
        metrics.record_backend_request(false);
        metrics.record_health_check(false);

        assert_eq!(metrics.backend_request_total.get(), 2);
        assert_eq!(metrics.backend_request_failure_total.get(), 1);
        assert_eq!(metrics.health_check_total.get(), 1);
        assert_eq!(metrics.health_check_failure_total.get(), 1);
        assert_eq!(registry.gather().len(), 6);
    }

    #[test]
    fn cannot_register_twice() {
        let mut registry = Registry::new();
        Metrics::initialize(&mut registry).unwrap();

        assert!(Metrics::initialize(&mut registry).is_err());
    }
}
