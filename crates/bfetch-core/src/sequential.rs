//! Sequential baseline: fetch each URL in turn on the current thread.
//!
//! No window, no concurrency; results come back lazily in input order. Useful
//! for comparing against [`crate::scheduler`] and for callers without a
//! runtime. Call from `spawn_blocking` if used from async code.

use url::Url;

use crate::error::FetchError;
use crate::transport::CurlFetcher;

/// Lazily fetch every URL of `urls`, one at a time, in input order.
pub fn fetch_all<'a, I>(
    fetcher: &'a CurlFetcher,
    urls: I,
) -> impl Iterator<Item = Result<Vec<u8>, FetchError>> + 'a
where
    I: IntoIterator<Item = Url>,
    I::IntoIter: 'a,
{
    urls.into_iter().map(move |url| {
        let result = fetcher.fetch_blocking(&url);
        match &result {
            Ok(body) => tracing::debug!(resource = %url, bytes = body.len(), "sequential fetch done"),
            Err(e) => tracing::warn!("sequential fetch failed: {}", e),
        }
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn yields_in_input_order_including_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::File::create(&a).unwrap().write_all(b"first").unwrap();
        std::fs::File::create(&b).unwrap().write_all(b"second").unwrap();
        let urls = vec![
            Url::from_file_path(&a).unwrap(),
            Url::from_file_path(dir.path().join("missing.txt")).unwrap(),
            Url::from_file_path(&b).unwrap(),
        ];
        let fetcher = CurlFetcher::default();
        let results: Vec<_> = fetch_all(&fetcher, urls).collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), b"first");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap(), b"second");
    }

    #[test]
    fn nothing_is_fetched_until_pulled() {
        let fetcher = CurlFetcher::default();
        let urls = vec![Url::parse("gopher://example.com/").unwrap()];
        let mut iter = fetch_all(&fetcher, urls);
        assert!(matches!(
            iter.next(),
            Some(Err(FetchError::UnsupportedScheme { .. }))
        ));
        assert!(iter.next().is_none());
    }
}
