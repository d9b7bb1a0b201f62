//! Value sources and first-match resolution.
//!
//! A source maps a lookup key to an optional raw string. Sources are tried in
//! the order they were given; the first one returning a non-empty value wins
//! and the rest are never called. An empty string counts as a miss. When every source misses, the caller falls back to the
//! field's declared value.

use std::collections::HashMap;
use std::sync::Arc;

/// A value provider: lookup key in, raw value out.
pub type Source = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The default source, backed by the process environment.
///
/// Variables holding non-UTF-8 data are treated as absent.
pub fn env_source() -> Source {
    Arc::new(|key: &str| std::env::var(key).ok())
}

/// A source over an in-memory snapshot of key/value pairs.
///
/// Handy for tests and for callers that already hold their values in a map.
pub fn map_source<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Source
where
    K: Into<String>,
    V: Into<String>,
{
    let values: HashMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Arc::new(move |key: &str| values.get(key).cloned())
}

/// Wrap an arbitrary closure as a [`Source`].
pub fn from_fn<F>(f: F) -> Source
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Query `sources` in order and return the first value found for `key`.
///
/// An empty string is treated as a miss, so the next source is asked.
pub fn resolve(sources: &[Source], key: &str) -> Option<String> {
    sources
        .iter()
        .find_map(|source| source(key).filter(|value| !value.is_empty()))
}
