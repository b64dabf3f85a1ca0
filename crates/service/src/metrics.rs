use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static POINTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "recycle_points_created_total",
        "Total collection points created"
    )
    .expect("register points_created_total")
});

pub static VALIDATION_REJECTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "recycle_points_validation_rejected_total",
        "Point submissions rejected by validation, by kind",
        &["kind"]
    )
    .expect("register validation_rejected_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "recycle_points_store_errors_total",
        "Durable store failures, by operation",
        &["op"]
    )
    .expect("register store_errors_total")
});

pub static STORE_COMMIT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "recycle_points_store_commit_seconds",
        "Duration of the load-append-commit sequence in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register store_commit_duration")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_metrics_include_registry_counters() {
        POINTS_CREATED_TOTAL.inc();
        VALIDATION_REJECTED_TOTAL.with_label_values(&["InvalidName"]).inc();
        let body = encode_metrics().unwrap();
        assert!(body.contains("recycle_points_created_total"));
        assert!(body.contains("recycle_points_validation_rejected_total"));
    }
}
