//! URL canonicalization for consistent cache keys.

use std::collections::BTreeMap;

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for minbar_core::Error {
    fn from(err: UrlError) -> Self {
        minbar_core::Error::InvalidUrl(err.to_string())
    }
}

/// Canonicalize a URL string for consistent caching.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (see [`split_query`])
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Move the query string of `url` into `params`.
///
/// Pairs already present in `params` win over the query string. The
/// returned URL has no query, so the cache key depends on the sorted
/// parameter set alone.
pub fn split_query(mut url: url::Url, mut params: BTreeMap<String, String>) -> (url::Url, BTreeMap<String, String>) {
    for (k, v) in url.query_pairs() {
        params.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    url.set_query(None);
    (url, params)
}
