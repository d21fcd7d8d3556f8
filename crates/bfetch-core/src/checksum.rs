//! Digest of a fetched resource (MD5 or SHA-256), as lowercase hex.
//!
//! One fetch, then one hash over the whole body; no scheduling involved.

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::FetchError;
use crate::transport::Fetcher;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

/// Digest `data` and return it as lowercase hex.
pub fn digest_hex(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    match algorithm {
        DigestAlgorithm::Md5 => hex::encode(Md5::digest(data)),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
    }
}

/// Fetch `id` and digest its content.
pub async fn digest_resource<F>(
    fetcher: &F,
    id: F::Id,
    algorithm: DigestAlgorithm,
) -> Result<String, FetchError>
where
    F: Fetcher,
    F::Content: AsRef<[u8]>,
{
    let content = fetcher.fetch(id).await?;
    Ok(digest_hex(algorithm, content.as_ref()))
}
