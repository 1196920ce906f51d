#[macro_export]
macro_rules! measure_block {
    ($metric:expr, $code:block) => {{
        let start = std::time::Instant::now();
        let result = $code;
        let elapsed = start.elapsed();

        $metric.observe(elapsed.as_secs_f64());
        result
    }};
}

/// Runs `$code` and records its wall time in the `$metric` histogram.
#[macro_export]
macro_rules! measure {
    ($metric:expr, $code:block) => {
        $crate::measure_block!($metric, $code)
    };
}

#[cfg(test)]
mod tests {
    use prometheus::{Histogram, HistogramOpts};

    #[test]
    fn test_measure_returns_block_value_and_observes() {
        let histogram = Histogram::with_opts(HistogramOpts::new("test_measure", "test")).unwrap();

        let value = crate::measure!(histogram, { 21 * 2 });

        assert_eq!(value, 42);
        assert_eq!(histogram.get_sample_count(), 1);
    }
}
