//! Caller-side pairing of results with their identifiers.

use std::future::Future;

use super::Fetcher;
use crate::error::FetchError;

/// Wraps a fetcher so each successful result carries the identifier that
/// produced it. Failures already name their target.
#[derive(Debug, Clone)]
pub struct Tagged<F>(pub F);

impl<F> Fetcher for Tagged<F>
where
    F: Fetcher,
    F::Id: Clone,
{
    type Id = F::Id;
    type Content = (F::Id, F::Content);

    fn fetch(&self, id: Self::Id) -> impl Future<Output = Result<Self::Content, FetchError>> + Send {
        let fut = self.0.fetch(id.clone());
        async move { fut.await.map(|content| (id, content)) }
    }
}
