//! Transport seam: the single `fetch(identifier)` operation the scheduler needs.
//!
//! [`CurlFetcher`] is the concrete libcurl transport (http, https, ftp, file);
//! [`Tagged`] pairs each result with the identifier that produced it.

mod cancel;
mod libcurl;
mod tagged;

use std::fmt;
use std::future::Future;

use crate::error::FetchError;

pub use libcurl::CurlFetcher;
pub use tagged::Tagged;

/// Something that can fetch one resource asynchronously.
///
/// Up to N calls are outstanding at once, each driven by its own task. The
/// returned future may be dropped at any await point; implementations must
/// release their resources when that happens.
pub trait Fetcher: Send + Sync + 'static {
    /// Resource identifier. `Display` labels log lines and errors.
    type Id: fmt::Display + Send + 'static;
    /// Content produced by a successful fetch.
    type Content: Send + 'static;

    fn fetch(&self, id: Self::Id)
        -> impl Future<Output = Result<Self::Content, FetchError>> + Send;
}
