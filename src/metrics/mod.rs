use prometheus::{Counter, Encoder, Histogram, TextEncoder};

use crate::metrics::handler::{counter, histogram_fast_ops, histogram_slow_ops};
pub mod handler;
lazy_static::lazy_static!(
    pub static ref USERS_CREATED_TOTAL: Counter =
        counter("users_created_total", "Total number of created users");

    pub static ref USER_STATUS_TOGGLES_TOTAL: Counter =
        counter("user_status_toggles_total", "Total number of user block/unblock operations");

    pub static ref SIGN_INS_TOTAL: Counter =
        counter("sign_ins_total", "Total number of successful sign-ins");

    pub static ref SIGN_IN_FAILURES_TOTAL: Counter =
        counter("sign_in_failures_total", "Total number of rejected sign-ins");

    pub static ref REPORTS_RENDERED_TOTAL: Counter =
        counter("reports_rendered_total", "Total number of rendered transaction reports");

    pub static ref DIRECTORY_OPERATION_TIME_SECONDS: Histogram =
        histogram_fast_ops("directory_operation_time_seconds", "Total time spent in user directory operations in seconds");

    pub static ref SIGN_IN_TIME_SECONDS: Histogram =
        histogram_slow_ops("sign_in_time_seconds", "Total time spent signing in, including simulated latency, in seconds");
);

/// Registers every metric with the default registry. Statics register on
/// first use, so a process that never touched one would otherwise export
/// nothing.
pub fn register_all() {
    lazy_static::initialize(&USERS_CREATED_TOTAL);
    lazy_static::initialize(&USER_STATUS_TOGGLES_TOTAL);
    lazy_static::initialize(&SIGN_INS_TOTAL);
    lazy_static::initialize(&SIGN_IN_FAILURES_TOTAL);
    lazy_static::initialize(&REPORTS_RENDERED_TOTAL);
    lazy_static::initialize(&DIRECTORY_OPERATION_TIME_SECONDS);
    lazy_static::initialize(&SIGN_IN_TIME_SECONDS);
}

/// Renders the default registry in the Prometheus text format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    register_all();

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
