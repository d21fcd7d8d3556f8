//! `bfetch seq` – sequential baseline, results in input order.

use anyhow::{Context, Result};
use bfetch_core::config::BfetchConfig;
use bfetch_core::{sequential, CurlFetcher};
use url::Url;

pub async fn run_seq(cfg: &BfetchConfig, urls: Box<dyn Iterator<Item = Url>>) -> Result<()> {
    // The URL source is not `Send`; collect before moving to the blocking pool.
    let urls: Vec<Url> = urls.collect();
    let fetcher = CurlFetcher::new(cfg.transport.clone());
    let failed = tokio::task::spawn_blocking(move || {
        let mut failed = 0usize;
        for (url, result) in urls.iter().zip(sequential::fetch_all(&fetcher, urls.clone())) {
            match result {
                Ok(body) => println!("ok   {}  {} bytes", url, body.len()),
                Err(e) => {
                    failed += 1;
                    println!("err  {}", e);
                }
            }
        }
        failed
    })
    .await
    .context("sequential task join")?;

    if failed > 0 {
        anyhow::bail!("{} fetches failed", failed);
    }
    Ok(())
}
