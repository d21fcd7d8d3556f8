//! CLI for bfetch.

mod commands;
mod input;
mod output;

use anyhow::Result;
use bfetch_core::checksum::DigestAlgorithm;
use bfetch_core::config;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::{run_compare, run_digest, run_fetch, run_seq};

/// Top-level CLI for bfetch.
#[derive(Debug, Parser)]
#[command(name = "bfetch")]
#[command(about = "bfetch: fetch many resources with a bounded window of concurrent transfers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Digest algorithm accepted by `bfetch digest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algo {
    Md5,
    Sha256,
}

impl From<Algo> for DigestAlgorithm {
    fn from(a: Algo) -> Self {
        match a {
            Algo::Md5 => DigestAlgorithm::Md5,
            Algo::Sha256 => DigestAlgorithm::Sha256,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch URLs with at most N transfers in flight; print results as they complete.
    Fetch {
        /// http(s), ftp or file URLs.
        urls: Vec<String>,
        /// Read more URLs from FILE, one per line ("-" for stdin).
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Maximum transfers in flight (default from config).
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
        /// Save each body into DIR.
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Print bodies as UTF-8 text.
        #[arg(long)]
        text: bool,
    },

    /// Fetch URLs one after another (sequential baseline), in input order.
    Seq {
        /// http(s), ftp or file URLs.
        urls: Vec<String>,
        /// Read more URLs from FILE, one per line ("-" for stdin).
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the digest of one resource.
    Digest {
        /// http(s), ftp or file URL.
        url: String,
        /// Digest algorithm.
        #[arg(long, value_enum, default_value_t = Algo::Md5)]
        algo: Algo,
    },

    /// Time the sequential baseline against the windowed scheduler.
    Compare {
        /// http(s), ftp or file URLs.
        urls: Vec<String>,
        /// Read more URLs from FILE, one per line ("-" for stdin).
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Window size for the scheduled run (default from config).
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                urls,
                input,
                jobs,
                output_dir,
                text,
            } => {
                let source = input::url_source(urls, input.as_deref())?;
                let jobs = jobs.unwrap_or(cfg.max_concurrency);
                run_fetch(&cfg, source, jobs, output_dir.as_deref(), text).await?;
            }
            CliCommand::Seq { urls, input } => {
                let source = input::url_source(urls, input.as_deref())?;
                run_seq(&cfg, source).await?;
            }
            CliCommand::Digest { url, algo } => run_digest(&cfg, &url, algo.into()).await?,
            CliCommand::Compare { urls, input, jobs } => {
                let urls: Vec<_> = input::url_source(urls, input.as_deref())?.collect();
                let jobs = jobs.unwrap_or(cfg.max_concurrency);
                run_compare(&cfg, &urls, jobs).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
