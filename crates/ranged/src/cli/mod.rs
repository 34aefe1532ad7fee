use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod copy;

#[derive(Clone, Debug, Parser)]
#[command(name = "ranged", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// URL of the remote resource
    pub url: String,

    /// Byte offset to start from
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Maximum number of bytes to copy (default: to the end)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Total resource length; skips the HEAD request when given
    #[arg(long)]
    pub length: Option<u64>,

    /// Span of a single range request in bytes
    #[arg(long, default_value_t = ranged_stream::data::options::DEFAULT_SEGMENT_SIZE)]
    pub segment_size: u64,

    /// Failed segment cycles tolerated per read
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Base backoff between retries in milliseconds
    #[arg(long, default_value_t = 0)]
    pub backoff_ms: u64,

    /// Extra request header, e.g. 'Authorization: Bearer token'
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Raise log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let Some((name, value)) = s.split_once(':') else {
        return Err(format!("expected 'Name: value', got '{s}'"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
