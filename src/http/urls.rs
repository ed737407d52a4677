use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Query parameter carrying the per-request cache-busting token.
pub const UNIQUE_PARAM: &str = "uniqueRequest";

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Path as written in the configuration.
    pub path: String,
    pub url: String,
}

/// Normalizes a base URL to end in exactly one `/`.
#[must_use]
pub fn resolve_base_url(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    format!("{}/", trimmed)
}

/// Resolves configured paths against `base`, keeping configuration order.
/// A repeated path is measured once, at its first position.
#[must_use]
pub fn resolve_pages<S>(base: &str, paths: &[S]) -> Vec<Endpoint>
where
    S: AsRef<str>,
{
    let base = resolve_base_url(base);
    let mut seen = BTreeSet::new();
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| seen.insert(*path))
        .map(|path| {
            let relative = path.strip_prefix('/').unwrap_or(path);
            Endpoint {
                path: path.to_owned(),
                url: format!("{}{}", base, relative),
            }
        })
        .collect()
}

/// Appends a `uniqueRequest` parameter that differs on every call so caches
/// and CDNs cannot answer the request.
#[must_use]
pub fn make_unique_url(url: &str) -> String {
    let (head, fragment) = url
        .split_once('#')
        .map_or((url, None), |(head, fragment)| (head, Some(fragment)));
    let separator = if head.ends_with(['?', '&']) {
        ""
    } else if head.contains('?') {
        "&"
    } else {
        "?"
    };
    let unique = format!("{}{}{}={}", head, separator, UNIQUE_PARAM, unique_token());
    match fragment {
        Some(fragment) => format!("{}#{}", unique, fragment),
        None => unique,
    }
}

fn unique_token() -> String {
    let micros = chrono::Utc::now().timestamp_micros();
    let sequence = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let noise: u64 = rand::random();
    format!("{:x}{:x}{:016x}", micros, sequence, noise)
}
