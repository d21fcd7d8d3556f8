//! libcurl transport: one `Easy` handle per fetch, run on tokio's blocking pool.
//!
//! Supports http, https, ftp, ftps and file URLs. The body is buffered in
//! memory. Dropping the future returned by [`Fetcher::fetch`] flags the
//! transfer as cancelled; libcurl then aborts at its next progress callback.

use std::future::Future;

use url::Url;

use super::cancel::{CancelFlag, CancelOnDrop};
use super::Fetcher;
use crate::config::TransportConfig;
use crate::error::FetchError;

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "file"];

/// Fetches URLs with libcurl, applying the configured timeouts and limits.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    cfg: TransportConfig,
}

impl CurlFetcher {
    pub fn new(cfg: TransportConfig) -> Self {
        Self { cfg }
    }

    /// Fetches `url` on the current thread. Call from `spawn_blocking` if used
    /// from async code.
    pub fn fetch_blocking(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.perform(url, &CancelFlag::default())
    }

    fn perform(&self, url: &Url, cancel: &CancelFlag) -> Result<Vec<u8>, FetchError> {
        let target = url.to_string();
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(FetchError::UnsupportedScheme {
                target,
                scheme: url.scheme().to_string(),
            });
        }
        let curl_err = |source: curl::Error| FetchError::Transport {
            target: target.clone(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(self.cfg.max_redirections)
            .map_err(curl_err)?;
        easy.connect_timeout(self.cfg.connect_timeout())
            .map_err(curl_err)?;
        easy.timeout(self.cfg.timeout()).map_err(curl_err)?;
        easy.low_speed_limit(self.cfg.low_speed_limit)
            .map_err(curl_err)?;
        easy.low_speed_time(self.cfg.low_speed_time())
            .map_err(curl_err)?;
        if let Some(agent) = &self.cfg.user_agent {
            easy.useragent(agent).map_err(curl_err)?;
        }
        if let Some(limit) = self.cfg.max_body_bytes {
            // Rejects early when the server announces the size; the write
            // callback below enforces it otherwise.
            easy.max_filesize(limit).map_err(curl_err)?;
        }
        easy.progress(true).map_err(curl_err)?;

        let limit = self.cfg.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();
        let mut exceeded = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    if let Some(limit) = limit {
                        if (body.len() + data.len()) as u64 > limit {
                            exceeded = true;
                            return Ok(0); // abort transfer
                        }
                    }
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer
                .progress_function(|_, _, _, _| !cancel.is_cancelled())
                .map_err(curl_err)?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if let (true, Some(limit)) = (exceeded || e.is_filesize_exceeded(), limit) {
                return Err(FetchError::BodyTooLarge { target, limit });
            }
            if cancel.is_cancelled() {
                tracing::debug!(resource = %target, "transfer aborted after cancellation");
            }
            return Err(curl_err(e));
        }

        if matches!(url.scheme(), "http" | "https") {
            let code = easy.response_code().map_err(curl_err)?;
            if !(200..300).contains(&code) {
                return Err(FetchError::Status { target, code });
            }
        }
        Ok(body)
    }
}

impl Fetcher for CurlFetcher {
    type Id = Url;
    type Content = Vec<u8>;

    fn fetch(&self, url: Url) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        let this = self.clone();
        async move {
            let target = url.to_string();
            let flag = CancelFlag::default();
            let guard = CancelOnDrop::new(flag.clone());
            let joined = tokio::task::spawn_blocking(move || this.perform(&url, &flag)).await;
            guard.disarm();
            joined.unwrap_or_else(|e| {
                Err(FetchError::Task {
                    target,
                    reason: e.to_string(),
                })
            })
        }
    }
}
