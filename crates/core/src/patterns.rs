//! Suspicious tenant-identifier scanning.
//!
//! Booking URLs embed the barbershop slug (`/app/<slug>` or
//! `/api/app/<slug>`). Before a slug ever reaches tenant resolution it is
//! checked against a fixed, ordered pattern blocklist: reserved words,
//! path traversal, script injection, and SQL-injection shapes.
//!
//! The reserved-word checks are deliberately substring matches, so a
//! legitimate slug like `administracao-barber` is also rejected. That
//! over-breadth is a known, documented trade-off of the current policy;
//! tightening it to word-boundary matching would change observable
//! behavior for existing tenants.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered blocklist: `(source, compiled matcher)`, compiled once.
///
/// The `source` strings are what gets logged in
/// `TENANT_NOT_FOUND_SUSPICIOUS` details, so keep them stable.
static SLUG_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("admin", r"(?i)admin"),
        ("test", r"(?i)test"),
        ("debug", r"(?i)debug"),
        ("api", r"(?i)api"),
        ("..", r"\.\."),
        ("<script", r"(?i)<script"),
        ("select.*from", r"(?i)select.*from"),
        ("union.*select", r"(?i)union.*select"),
    ]
    .into_iter()
    .map(|(source, pattern)| {
        (source, Regex::new(pattern).expect("blocklist patterns are valid"))
    })
    .collect()
});

/// Extract the candidate tenant slug from a request path of the shape
/// `/app/<slug>` or `/api/app/<slug>`.
///
/// Returns `None` for any other path shape, including a bare `/app` or
/// `/app/` with no slug segment.
pub fn extract_tenant_slug(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_prefix("api/").unwrap_or(rest);
    let rest = rest.strip_prefix("app/")?;
    let slug = rest.split('/').next().unwrap_or("");
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Test `slug` against the blocklist, returning the sources of every
/// matching pattern in blocklist order. An empty result means clean.
pub fn scan_slug(slug: &str) -> Vec<&'static str> {
    SLUG_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(slug))
        .map(|(source, _)| *source)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
