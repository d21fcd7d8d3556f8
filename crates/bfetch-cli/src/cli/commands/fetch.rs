//! `bfetch fetch` – stream results through the bounded window.

use anyhow::{Context, Result};
use bfetch_core::config::BfetchConfig;
use bfetch_core::error::decode_text;
use bfetch_core::{stream, CurlFetcher, Tagged};
use std::path::Path;
use std::time::Instant;
use url::Url;

use crate::cli::output::output_filename;

pub async fn run_fetch(
    cfg: &BfetchConfig,
    urls: impl Iterator<Item = Url>,
    jobs: usize,
    output_dir: Option<&Path>,
    text: bool,
) -> Result<()> {
    if let Some(dir) = output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create {}", dir.display()))?;
    }

    let fetcher = Tagged(CurlFetcher::new(cfg.transport.clone()));
    let mut results = stream(fetcher, urls, jobs)?;
    let start = Instant::now();
    let mut seq = 0usize;

    while let Some(result) = results.next().await {
        match result {
            Ok((url, body)) => {
                println!("ok   {}  {} bytes", url, body.len());
                if let Some(dir) = output_dir {
                    let path = dir.join(output_filename(seq, &url));
                    tokio::fs::write(&path, &body)
                        .await
                        .with_context(|| format!("write {}", path.display()))?;
                    tracing::debug!(path = %path.display(), "saved body");
                }
                if text {
                    match decode_text(body, url.as_str()) {
                        Ok(s) => println!("{}", s),
                        Err(e) => eprintln!("{}", e),
                    }
                }
            }
            Err(e) => println!("err  {}", e),
        }
        seq += 1;
    }

    let stats = results.stats();
    println!(
        "{} ok, {} failed in {:.2}s (window {}, peak {} in flight)",
        stats.succeeded,
        stats.failed,
        start.elapsed().as_secs_f64(),
        stats.capacity,
        stats.peak_in_flight
    );
    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        peak_in_flight = stats.peak_in_flight,
        "fetch finished"
    );
    if stats.failed > 0 {
        anyhow::bail!("{} of {} fetches failed", stats.failed, stats.completed());
    }
    Ok(())
}
