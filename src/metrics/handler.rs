use prometheus::{Counter, Histogram, HistogramOpts, register_counter, register_histogram};

pub fn counter(name: &str, help: &str) -> Counter {
    register_counter!(name, help).expect("Could not register counter")
}

/// Buckets for in-memory lookups, where only the simulated delay dominates.
pub fn histogram_fast_ops(name: &str, help: &str) -> Histogram {
    let opts = HistogramOpts::new(name, help).buckets(vec![
        0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0,
    ]);
    register_histogram!(opts).expect("Could not register histogram")
}

pub fn histogram_slow_ops(name: &str, help: &str) -> Histogram {
    let opts = HistogramOpts::new(name, help)
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0]);
    register_histogram!(opts).expect("Could not register histogram")
}
