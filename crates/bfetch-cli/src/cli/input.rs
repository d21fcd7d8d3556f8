//! URL sources for the fetch commands: positional arguments, then a file or stdin.
//!
//! Lines are read lazily so a long list starts fetching before it is fully read.
//! Stdin is read on its own thread; the scheduler waits for the next line
//! inside `block_in_place`, so other tasks keep the worker thread.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use url::Url;

/// Lines buffered ahead of the scheduler when reading stdin.
const LINE_BACKLOG: usize = 64;

/// Parses one input line. Blank lines and `#` comments yield `None`;
/// unparsable lines are logged and skipped.
pub(super) fn parse_line(line: &str) -> Option<Url> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match Url::parse(line) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("skipping invalid URL {:?}: {}", line, e);
            eprintln!("skipping invalid URL {:?}: {}", line, e);
            None
        }
    }
}

/// Reads `reader` line by line on a dedicated thread, at most
/// [`LINE_BACKLOG`] lines ahead of the consumer.
///
/// Needs a multi-threaded runtime when pulled from async code.
fn threaded_lines<R>(reader: R) -> Result<impl Iterator<Item = io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(LINE_BACKLOG);
    // Plain thread: runtime shutdown must not wait on a parked stdin read.
    thread::Builder::new()
        .name("bfetch-input".into())
        .spawn(move || {
            for line in reader.lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("spawn input reader thread")?;
    Ok(std::iter::from_fn(move || {
        tokio::task::block_in_place(|| rx.recv().ok())
    }))
}

/// Positional `args` followed by the lines of `input` ("-" = stdin).
pub(super) fn url_source(
    args: Vec<String>,
    input: Option<&Path>,
) -> Result<Box<dyn Iterator<Item = Url>>> {
    let from_args = args.into_iter().filter_map(|a| parse_line(&a));
    let lines: Box<dyn Iterator<Item = std::io::Result<String>>> = match input {
        None => Box::new(std::iter::empty()),
        Some(p) if p == Path::new("-") => {
            Box::new(threaded_lines(BufReader::new(io::stdin()))?)
        }
        Some(p) => {
            let file = File::open(p).with_context(|| format!("open {}", p.display()))?;
            Box::new(BufReader::new(file).lines())
        }
    };
    let from_input = lines
        .map_while(|line| match line {
            Ok(l) => Some(l),
            Err(e) => {
                tracing::warn!("stopped reading URL list: {}", e);
                None
            }
        })
        .filter_map(|l| parse_line(&l));
    Ok(Box::new(from_args.chain(from_input)))
}
