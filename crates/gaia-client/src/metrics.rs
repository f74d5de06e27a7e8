use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec,
    HistogramVec, IntCounter,
};

pub static BACKEND_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "gaia_backend_requests_total",
        "Backend calls by operation and outcome",
        &["op", "outcome"]
    )
    .unwrap()
});

pub static BACKEND_REQUEST_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gaia_backend_request_seconds",
        "Backend call latency",
        &["op"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 90.0]
    )
    .unwrap()
});

pub static DISCOVERY_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gaia_discovery_failures_total",
        "Per-dataset discovery calls that degraded to a null description"
    )
    .unwrap()
});

/// Label for the `outcome` dimension of [`BACKEND_REQUESTS_TOTAL`].
pub fn outcome_label<T>(res: &gaia_core::Result<T>) -> &'static str {
    use gaia_core::GaiaError;
    match res {
        Ok(_) => "ok",
        Err(GaiaError::Transport(_)) => "transport",
        Err(GaiaError::Rejected { .. }) => "rejected",
        Err(GaiaError::Decode(_)) => "decode",
        Err(_) => "error",
    }
}
