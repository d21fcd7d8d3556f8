//! `bfetch compare` – sequential vs windowed timings.

use anyhow::Result;
use bfetch_core::bench::{self, BenchResult};
use bfetch_core::config::BfetchConfig;
use bfetch_core::CurlFetcher;
use url::Url;

fn print_bench_results(results: &[BenchResult]) {
    println!(
        "  {:>12}  {:>6}  {:>6}  {:>10}  {:>8}  {:>8}",
        "Mode", "Items", "Failed", "Bytes", "Time(s)", "MiB/s"
    );
    println!(
        "  {}  {}  {}  {}  {}  {}",
        "------------", "------", "------", "----------", "--------", "--------"
    );
    for r in results {
        println!(
            "  {:>12}  {:>6}  {:>6}  {:>10}  {:>8.2}  {:>8.2}",
            r.mode,
            r.items,
            r.failures,
            r.bytes,
            r.elapsed_secs,
            r.throughput_mib_s()
        );
    }
}

pub async fn run_compare(cfg: &BfetchConfig, urls: &[Url], jobs: usize) -> Result<()> {
    if urls.is_empty() {
        anyhow::bail!("no URLs to compare");
    }
    let fetcher = CurlFetcher::new(cfg.transport.clone());
    let results = bench::compare(&fetcher, urls, jobs).await?;
    print_bench_results(&results);
    if let [seq, windowed] = results.as_slice() {
        if windowed.elapsed_secs > 0.0 {
            println!(
                "Speedup with window {}: {:.2}x",
                jobs,
                seq.elapsed_secs / windowed.elapsed_secs
            );
        }
    }
    Ok(())
}
