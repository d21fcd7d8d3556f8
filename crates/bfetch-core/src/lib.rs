pub mod config;
pub mod logging;

pub mod bench;
pub mod checksum;
pub mod error;
pub mod scheduler;
pub mod sequential;
pub mod transport;

pub use error::{ErrorKind, FetchError, SchedulerError};
pub use scheduler::{stream, FetchStream, WindowStats};
pub use transport::{CurlFetcher, Fetcher, Tagged};
