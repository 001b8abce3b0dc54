use crate::util::errors::Error;
use prometheus::{histogram_opts, opts, HistogramVec, IntCounter, IntCounterVec, Registry};
use tokio::time::Instant;

#[derive(Clone)]
pub struct Metrics {
    pub reconciliations: IntCounter,
    pub failures: IntCounterVec,
    pub reconcile_duration: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        let reconcile_duration = HistogramVec::new(
            histogram_opts!(
                "metastore_reconcile_duration_seconds",
                "The duration of a metastore reconciliation in seconds",
            )
            // a reconciliation is at most two workspace API round trips
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1., 2.5, 5., 15.]),
            &["operation"],
        )
        .unwrap();
        let failures = IntCounterVec::new(
            opts!("metastore_reconciliation_errors_total", "reconciliation errors",),
            &["name", "error"],
        )
        .unwrap();
        let reconciliations =
            IntCounter::new("metastore_reconciliations_total", "reconciliations").unwrap();
        Metrics {
            reconciliations,
            failures,
            reconcile_duration,
        }
    }
}

impl Metrics {
    /// Register API metrics to start tracking them.
    pub fn register(self, registry: &Registry) -> Result<Self, prometheus::Error> {
        registry.register(Box::new(self.reconcile_duration.clone()))?;
        registry.register(Box::new(self.failures.clone()))?;
        registry.register(Box::new(self.reconciliations.clone()))?;
        Ok(self)
    }

    pub fn reconcile_failure(&self, name: &str, e: &Error) {
        self.failures
            .with_label_values(&[name, e.metric_label().as_ref()])
            .inc()
    }

    pub fn count_and_measure(&self, operation: &str) -> ReconcileMeasurer {
        self.reconciliations.inc();
        ReconcileMeasurer {
            start: Instant::now(),
            metric: self.reconcile_duration.clone(),
            operation: operation.to_string(),
        }
    }
}

/// Smart function duration measurer
///
/// Relies on Drop to calculate duration and register the observation in the histogram
pub struct ReconcileMeasurer {
    start: Instant,
    metric: HistogramVec,
    operation: String,
}

impl Drop for ReconcileMeasurer {
    fn drop(&mut self) {
        #[allow(clippy::cast_precision_loss)]
        let duration = self.start.elapsed().as_millis() as f64 / 1000.0;
        self.metric
            .with_label_values(&[self.operation.as_str()])
            .observe(duration);
    }
}
