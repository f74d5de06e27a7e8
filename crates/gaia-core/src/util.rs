/// Joins the configured host and an API path, tolerating a trailing slash on the host.
pub fn endpoint(host: &str, path: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `Some` only for strings with content; the backend must never see empty filters.
pub fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
