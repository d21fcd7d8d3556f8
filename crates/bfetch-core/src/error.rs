//! Error types: per-resource fetch failures and scheduler configuration errors.
//!
//! A [`FetchError`] is a value in the output sequence, never a reason to stop
//! the stream. [`SchedulerError`] is raised before anything is launched.


use thiserror::Error;

/// `CURLE_REMOTE_FILE_NOT_FOUND`: FTP 550, SFTP missing path.
const CURLE_REMOTE_FILE_NOT_FOUND: u32 = 78;

/// Raised synchronously when a stream cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The window size must be at least 1.
    #[error("invalid concurrency limit {limit}: must be a positive integer")]
    InvalidConcurrencyLimit { limit: usize },
}

/// Failure of a single fetch. Every variant carries the display form of the
/// identifier it was fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported an error (timeout, connection, missing file, aborted write).
    #[error("{target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: curl::Error,
    },
    /// HTTP response had a non-2xx status.
    #[error("{target}: HTTP {code}")]
    Status { target: String, code: u32 },
    /// The identifier's scheme has no transport.
    #[error("{target}: unsupported scheme '{scheme}'")]
    UnsupportedScheme { target: String, scheme: String },
    /// Body exceeded the configured `max_body_bytes`.
    #[error("{target}: body exceeds {limit} bytes")]
    BodyTooLarge { target: String, limit: u64 },
    /// Content was requested as text but is not valid UTF-8.
    #[error("{target}: content is not valid UTF-8")]
    Decode {
        target: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// The task running the fetch panicked or was torn down.
    #[error("{target}: fetch task failed: {reason}")]
    Task { target: String, reason: String },
    /// Anything else a transport wants to report.
    #[error("{target}: {message}")]
    Other { target: String, message: String },
}

/// Coarse classification of a fetch failure, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read/low speed).
    Timeout,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Resource does not exist (HTTP 404/410, missing file, FTP 550).
    NotFound,
    /// Any other non-2xx HTTP status.
    Status(u32),
    /// Body over the configured cap.
    TooLarge,
    /// Content could not be decoded.
    Decode,
    /// Any other error.
    Other,
}

impl FetchError {
    /// Label of the resource this error belongs to.
    pub fn target(&self) -> &str {
        match self {
            FetchError::Transport { target, .. }
            | FetchError::Status { target, .. }
            | FetchError::UnsupportedScheme { target, .. }
            | FetchError::BodyTooLarge { target, .. }
            | FetchError::Decode { target, .. }
            | FetchError::Task { target, .. }
            | FetchError::Other { target, .. } => target,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport { source, .. } => classify_curl_error(source),
            FetchError::Status { code, .. } => classify_http_status(*code),
            FetchError::BodyTooLarge { .. } => ErrorKind::TooLarge,
            FetchError::Decode { .. } => ErrorKind::Decode,
            FetchError::UnsupportedScheme { .. }
            | FetchError::Task { .. }
            | FetchError::Other { .. } => ErrorKind::Other,
        }
    }
}

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        404 | 410 => ErrorKind::NotFound,
        408 | 504 => ErrorKind::Timeout,
        _ => ErrorKind::Status(code),
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_file_couldnt_read_file() || e.code() == CURLE_REMOTE_FILE_NOT_FOUND {
        return ErrorKind::NotFound;
    }
    if e.is_filesize_exceeded() {
        return ErrorKind::TooLarge;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Interpret fetched bytes as UTF-8 text.
pub fn decode_text(content: Vec<u8>, target: &str) -> Result<String, FetchError> {
    String::from_utf8(content).map_err(|source| FetchError::Decode {
        target: target.to_string(),
        source,
    })
}
