//! Endpoint classification and client identity extraction (§4.6). Both are
//! pure functions over strings so they're usable from any HTTP surface
//! without pulling in a specific web framework here — `hirearc-cli` is
//! where the real headers and method get read off the wire.

/// One of the eight endpoint classification tags. The string returned by
/// [`EndpointClass::as_str`] is also the key used to look up the tag's
/// [`hirearc_config::EndpointProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointClass {
    Health,
    Auth,
    Admin,
    FileUpload,
    JobApplication,
    JobView,
    Static,
    General,
}

impl EndpointClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Auth => "auth",
            Self::Admin => "admin",
            Self::FileUpload => "file_upload",
            Self::JobApplication => "job_application",
            Self::JobView => "job_view",
            Self::Static => "static",
            Self::General => "general",
        }
    }

    /// Whether this tag competes for the global resource-intensive
    /// concurrency budget (§4.6 "A separate counter applies only to
    /// resource-intensive tags").
    #[must_use]
    pub const fn is_resource_intensive(self) -> bool {
        matches!(self, Self::JobApplication | Self::FileUpload)
    }
}

/// Classifies `path`/`method` into one of the eight tags, in the exact
/// check order the classifier must follow: health first (so health checks
/// are never starved by stricter tags), general last as the catch-all.
#[must_use]
pub fn classify_endpoint(path: &str, method: &str) -> EndpointClass {
    let path = path.to_lowercase();
    let method = method.to_uppercase();

    if ["/health", "/status", "/ping"].iter().any(|p| path.contains(p)) {
        return EndpointClass::Health;
    }
    if ["/auth", "/login", "/logout", "/token"].iter().any(|p| path.contains(p)) {
        return EndpointClass::Auth;
    }
    if path.contains("/admin") {
        return EndpointClass::Admin;
    }
    if method == "POST" && ["/upload", "/file"].iter().any(|p| path.contains(p)) {
        return EndpointClass::FileUpload;
    }
    if path.contains("/apply") && method == "POST" {
        return EndpointClass::JobApplication;
    }
    if path.contains("/jobs/") && method == "GET" {
        return EndpointClass::JobView;
    }
    if ["/static", "/assets", "/favicon", "/_next"].iter().any(|p| path.contains(p)) {
        return EndpointClass::Static;
    }
    EndpointClass::General
}

fn is_valid_ipv4(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split('.').collect();
    parts.len() == 4 && parts.iter().all(|part| part.parse::<u8>().is_ok())
}

/// §4.6 client identity: the first valid dotted-quad IPv4 found across a
/// prioritized list of forwarded-for headers (comma-separated values take
/// the first entry), falling back to the direct peer address.
#[must_use]
pub fn extract_client_ip<'a>(
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    peer_addr: Option<&str>,
) -> String {
    const PRIORITY: [&str; 4] = ["x-forwarded-for", "x-real-ip", "x-client-ip", "cf-connecting-ip"];
    let headers: Vec<(String, &str)> = headers
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect();

    for wanted in PRIORITY {
        if let Some((_, value)) = headers.iter().find(|(name, _)| name == wanted) {
            if let Some(candidate) = value.split(',').next().map(str::trim) {
                if is_valid_ipv4(candidate) {
                    return candidate.to_string();
                }
            }
        }
    }

    peer_addr.filter(|addr| is_valid_ipv4(addr)).map_or_else(|| "unknown".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_checks_win_even_when_other_patterns_would_match() {
        assert_eq!(classify_endpoint("/health/admin", "GET"), EndpointClass::Health);
    }

    #[test]
    fn classification_follows_the_documented_priority_order() {
        assert_eq!(classify_endpoint("/api/auth/login", "POST"), EndpointClass::Auth);
        assert_eq!(classify_endpoint("/admin/users", "GET"), EndpointClass::Admin);
        assert_eq!(classify_endpoint("/api/upload", "POST"), EndpointClass::FileUpload);
        assert_eq!(classify_endpoint("/api/upload", "GET"), EndpointClass::General);
        assert_eq!(classify_endpoint("/api/apply", "POST"), EndpointClass::JobApplication);
        assert_eq!(classify_endpoint("/api/jobs/42", "GET"), EndpointClass::JobView);
        assert_eq!(classify_endpoint("/static/app.js", "GET"), EndpointClass::Static);
        assert_eq!(classify_endpoint("/anything/else", "GET"), EndpointClass::General);
    }

    #[test]
    fn resource_intensive_tags_are_exactly_upload_and_apply() {
        assert!(EndpointClass::JobApplication.is_resource_intensive());
        assert!(EndpointClass::FileUpload.is_resource_intensive());
        assert!(!EndpointClass::JobView.is_resource_intensive());
    }

    #[test]
    fn first_valid_header_in_priority_order_wins() {
        let headers = [("X-Real-IP", "10.0.0.5"), ("X-Forwarded-For", "203.0.113.9, 10.0.0.1")];
        assert_eq!(extract_client_ip(headers, None), "203.0.113.9");
    }

    #[test]
    fn invalid_header_values_fall_through_to_peer_addr() {
        let headers = [("X-Forwarded-For", "not-an-ip")];
        assert_eq!(extract_client_ip(headers, Some("192.168.1.1")), "192.168.1.1");
    }

    #[test]
    fn no_valid_source_yields_unknown() {
        assert_eq!(extract_client_ip(std::iter::empty(), None), "unknown");
    }
}
