//! Compare mode: fetch the same URL list sequentially and through the window.
//!
//! Reports items, failures, bytes and wall time for each approach so the
//! effect of the concurrency limit can be seen on a real workload.

use anyhow::{Context, Result};
use std::time::Instant;
use url::Url;

use crate::scheduler::stream;
use crate::sequential;
use crate::transport::CurlFetcher;

/// Outcome of one approach over the whole URL list.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    /// "sequential" or "window(N)".
    pub mode: String,
    pub items: usize,
    pub failures: usize,
    pub bytes: u64,
    pub elapsed_secs: f64,
}

impl BenchResult {
    /// Throughput in MiB/s (0 if elapsed is 0).
    pub fn throughput_mib_s(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes as f64 / 1_048_576.0 / self.elapsed_secs
    }
}

#[derive(Default)]
struct Tally {
    items: usize,
    failures: usize,
    bytes: u64,
}

impl Tally {
    fn add(&mut self, result: &Result<Vec<u8>, crate::error::FetchError>) {
        self.items += 1;
        match result {
            Ok(body) => self.bytes += body.len() as u64,
            Err(_) => self.failures += 1,
        }
    }

    fn finish(self, mode: String, start: Instant) -> BenchResult {
        BenchResult {
            mode,
            items: self.items,
            failures: self.failures,
            bytes: self.bytes,
            elapsed_secs: start.elapsed().as_secs_f64(),
        }
    }
}

/// Runs the sequential baseline, then the windowed scheduler with
/// `max_concurrency`, over `urls`. Returns one result per approach.
pub async fn compare(
    fetcher: &CurlFetcher,
    urls: &[Url],
    max_concurrency: usize,
) -> Result<Vec<BenchResult>> {
    let seq = {
        let fetcher = fetcher.clone();
        let urls = urls.to_vec();
        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let mut tally = Tally::default();
            for result in sequential::fetch_all(&fetcher, urls) {
                tally.add(&result);
            }
            tally.finish("sequential".to_string(), start)
        })
        .await
        .context("sequential bench task join")?
    };
    tracing::info!(elapsed_secs = seq.elapsed_secs, items = seq.items, "sequential run done");

    let start = Instant::now();
    let mut tally = Tally::default();
    let mut results = stream(fetcher.clone(), urls.to_vec(), max_concurrency)?;
    while let Some(result) = results.next().await {
        tally.add(&result);
    }
    let windowed = tally.finish(format!("window({})", max_concurrency), start);
    tracing::info!(
        elapsed_secs = windowed.elapsed_secs,
        items = windowed.items,
        peak_in_flight = results.stats().peak_in_flight,
        "windowed run done"
    );

    Ok(vec![seq, windowed])
}
