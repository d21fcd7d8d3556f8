//! Pull-driven stream of fetch results in completion order.

use std::sync::Arc;

use super::stats::WindowStats;
use super::window::Window;
use crate::error::{FetchError, SchedulerError};
use crate::transport::Fetcher;

/// Lazily produced results of fetching every identifier of `I`, at most
/// `max_concurrency` at a time.
///
/// Nothing is launched until the first call to [`FetchStream::next`]. Each
/// call then suspends until some in-flight fetch completes, refills the freed
/// slot from the input, and returns that result. Dropping the stream aborts
/// every fetch still in flight.
pub struct FetchStream<F: Fetcher, I> {
    window: Window<F>,
    /// `None` once the input is exhausted (drain phase).
    input: Option<I>,
    filled: bool,
}

/// Build a stream over `identifiers` with a window of `max_concurrency` fetches.
///
/// Fails with [`SchedulerError::InvalidConcurrencyLimit`] when the limit is 0;
/// no fetch is launched in that case.
pub fn stream<F, T>(
    fetcher: F,
    identifiers: T,
    max_concurrency: usize,
) -> Result<FetchStream<F, T::IntoIter>, SchedulerError>
where
    F: Fetcher,
    T: IntoIterator<Item = F::Id>,
{
    FetchStream::new(fetcher, identifiers, max_concurrency)
}

impl<F, I> FetchStream<F, I>
where
    F: Fetcher,
    I: Iterator<Item = F::Id>,
{
    pub fn new<T>(fetcher: F, identifiers: T, max_concurrency: usize) -> Result<Self, SchedulerError>
    where
        T: IntoIterator<Item = F::Id, IntoIter = I>,
    {
        Self::with_shared(Arc::new(fetcher), identifiers, max_concurrency)
    }

    /// Like [`FetchStream::new`] for a fetcher shared with other streams.
    pub fn with_shared<T>(
        fetcher: Arc<F>,
        identifiers: T,
        max_concurrency: usize,
    ) -> Result<Self, SchedulerError>
    where
        T: IntoIterator<Item = F::Id, IntoIter = I>,
    {
        if max_concurrency == 0 {
            return Err(SchedulerError::InvalidConcurrencyLimit {
                limit: max_concurrency,
            });
        }
        Ok(Self {
            window: Window::new(fetcher, max_concurrency),
            input: Some(identifiers.into_iter()),
            filled: false,
        })
    }

    /// Next result in completion order, or `None` once every launched fetch
    /// has been yielded and the input is exhausted.
    pub async fn next(&mut self) -> Option<Result<F::Content, FetchError>> {
        if !self.filled {
            self.filled = true;
            self.top_up();
        }
        let result = self.window.next_completion().await?;
        self.top_up();
        Some(result)
    }

    /// Pull every remaining result.
    pub async fn collect_all(mut self) -> Vec<Result<F::Content, FetchError>> {
        let mut out = Vec::new();
        while let Some(result) = self.next().await {
            out.push(result);
        }
        out
    }

    /// Stop early: abort every in-flight fetch and wait for them to stop.
    /// The input is not consumed any further.
    pub async fn shutdown(mut self) {
        self.input = None;
        self.window.shutdown().await;
    }

    pub fn stats(&self) -> WindowStats {
        self.window.stats()
    }

    /// Fetches currently in flight.
    pub fn in_flight(&self) -> usize {
        self.window.in_flight()
    }

    /// True once the input is exhausted and only in-flight fetches remain.
    pub fn is_draining(&self) -> bool {
        self.input.is_none()
    }

    /// Launch from the input into free slots until the window is full or the
    /// input runs out.
    fn top_up(&mut self) {
        while let Some(slot) = self.window.free_slot() {
            let Some(input) = self.input.as_mut() else {
                return;
            };
            match input.next() {
                Some(id) => self.window.launch(slot, id),
                None => {
                    self.input = None;
                    tracing::debug!(
                        in_flight = self.window.in_flight(),
                        "input exhausted, draining"
                    );
                }
            }
        }
    }
}
