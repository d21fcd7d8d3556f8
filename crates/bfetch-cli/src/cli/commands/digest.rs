//! `bfetch digest` – fetch one resource and print its digest.

use anyhow::{Context, Result};
use bfetch_core::checksum::{self, DigestAlgorithm};
use bfetch_core::config::BfetchConfig;
use bfetch_core::CurlFetcher;
use url::Url;

/// Compute and print the digest of the resource at `url`.
pub async fn run_digest(cfg: &BfetchConfig, url: &str, algorithm: DigestAlgorithm) -> Result<()> {
    let url = Url::parse(url).with_context(|| format!("invalid URL {:?}", url))?;
    let fetcher = CurlFetcher::new(cfg.transport.clone());
    let digest = checksum::digest_resource(&fetcher, url.clone(), algorithm).await?;
    tracing::debug!(algorithm = algorithm.name(), resource = %url, "digest computed");
    println!("{}  {}", digest, url);
    Ok(())
}
