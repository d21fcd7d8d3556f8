//! Bounded-concurrency streaming scheduler.
//!
//! Keeps a window of at most N fetches in flight over a lazily consumed
//! identifier sequence and hands results back in completion order:
//! fill the window → wait for the first completion → refill its slot → yield;
//! once the input runs dry, drain what is left.

mod stats;
mod stream;
mod window;

pub use stats::WindowStats;
pub use stream::{stream, FetchStream};
