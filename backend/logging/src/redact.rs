//! URL Redaction
//!
//! Scrubs credentials from URLs before they reach a log line: userinfo
//! (`user:pass@`) and token-like query parameters.

use regex::Regex;
use std::sync::LazyLock;

static USERINFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z][a-z0-9+.-]*://)[^/@?#]+@").unwrap());
static SECRET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:token|access_token|api_key|apikey|key|secret|password)=)[^&#]*")
        .unwrap()
});

/// Redacts credentials embedded in a URL.
pub fn redact_url(input: &str) -> String {
    let redacted = USERINFO_RE.replace(input, "${1}[REDACTED]@");
    SECRET_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED]")
        .into_owned()
}
