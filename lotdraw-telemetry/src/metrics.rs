//! ## lotdraw-telemetry::metrics
//! **Prometheus counters and histograms for the draw service**

use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub draws: Counter,
    pub replays: Counter,
    pub rejections: CounterVec,
    pub resets: Counter,
    pub persistence_failures: Counter,
    pub draw_latency: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    /// Builds a recorder with its own registry.
    ///
    /// # Panics
    /// Only if metric names are malformed, which the constants below rule out.
    pub fn new() -> Self {
        Self::try_new().expect("static metric definitions are valid")
    }

    pub fn try_new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let draws = Counter::new("lotdraw_draws_total", "Fresh assignments made")?;
        let replays = Counter::new(
            "lotdraw_replays_total",
            "Repeat draws answered with an existing assignment",
        )?;
        let rejections = CounterVec::new(
            Opts::new("lotdraw_rejections_total", "Draws refused, by reason"),
            &["reason"],
        )?;
        let resets = Counter::new("lotdraw_resets_total", "Cycle resets")?;
        let persistence_failures = Counter::new(
            "lotdraw_persistence_failures_total",
            "Snapshot writes that failed after an in-memory change",
        )?;
        let draw_latency = Histogram::with_opts(
            HistogramOpts::new("lotdraw_draw_latency_ns", "Draw processing time")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0]),
        )?;

        registry.register(Box::new(draws.clone()))?;
        registry.register(Box::new(replays.clone()))?;
        registry.register(Box::new(rejections.clone()))?;
        registry.register(Box::new(resets.clone()))?;
        registry.register(Box::new(persistence_failures.clone()))?;
        registry.register(Box::new(draw_latency.clone()))?;

        Ok(Self {
            registry,
            draws,
            replays,
            rejections,
            resets,
            persistence_failures,
            draw_latency,
        })
    }

    /// Text exposition of every registered metric.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn inc_rejection(&self, reason: &str) {
        self.rejections.with_label_values(&[reason]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = MetricsRecorder::new();
        metrics.draws.inc();
        metrics.inc_rejection("all_slots_filled");
        metrics.draw_latency.observe(5_000.0);

        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("lotdraw_draws_total 1"));
        assert!(text.contains("lotdraw_rejections_total{reason=\"all_slots_filled\"} 1"));
        assert!(text.contains("lotdraw_draw_latency_ns_count 1"));
    }

    #[test]
    fn recorders_are_independent() {
        let a = MetricsRecorder::new();
        let b = MetricsRecorder::new();
        a.resets.inc();
        assert_eq!(a.resets.get(), 1.0);
        assert_eq!(b.resets.get(), 0.0);
    }
}
