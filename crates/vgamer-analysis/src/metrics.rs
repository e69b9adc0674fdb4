//! Analysis counters.

use metrics::counter;

pub mod names {
    pub const ANALYSIS_REQUESTS_TOTAL: &str = "vgamer_analysis_requests_total";
    pub const ANALYSIS_FAILURES_TOTAL: &str = "vgamer_analysis_failures_total";
}

pub fn record_request(model: &str) {
    counter!(names::ANALYSIS_REQUESTS_TOTAL, "model" => model.to_string()).increment(1);
}

pub fn record_failure(model: &str) {
    counter!(names::ANALYSIS_FAILURES_TOTAL, "model" => model.to_string()).increment(1);
}
