//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes:
//! - `GET /delay/<ms>/<name>` sleeps `ms` milliseconds, then answers 200 with body `name`.
//! - `GET /status/<code>` answers with that status and an empty body.
//! - anything else answers 404.
//!
//! Tracks how many requests are being served at once so tests can check the
//! client never exceeds its concurrency limit.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ServerStats {
    active: AtomicUsize,
    peak: AtomicUsize,
    requests: AtomicUsize,
}

impl ServerStats {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

pub struct TestServer {
    pub base: String,
    pub stats: Arc<ServerStats>,
}

impl TestServer {
    /// URL for `path` (without leading slash).
    pub fn url(&self, path: &str) -> url::Url {
        url::Url::parse(&format!("{}{}", self.base, path)).unwrap()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let stats = Arc::new(ServerStats::default());
    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &stats));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}/", port),
        stats,
    }
}

fn handle(mut stream: std::net::TcpStream, stats: &ServerStats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    stats.requests.fetch_add(1, Ordering::SeqCst);
    let now = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak.fetch_max(now, Ordering::SeqCst);

    let (status, body) = route(&path);

    stats.active.fetch_sub(1, Ordering::SeqCst);

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

fn route(path: &str) -> (String, String) {
    let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match parts.as_slice() {
        ["delay", ms, name] => {
            let ms = ms.parse::<u64>().unwrap_or(0);
            thread::sleep(Duration::from_millis(ms));
            ("200 OK".to_string(), name.to_string())
        }
        ["status", code] => (format!("{} Test", code), String::new()),
        _ => ("404 Not Found".to_string(), String::new()),
    }
}
