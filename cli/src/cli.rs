//! CLI argument parsing for the `ge` binary.
//!
//! Uses clap for argument parsing with environment variable fallbacks.

use clap::{Args, Parser, Subcommand, ValueHint};
use grand_exchange::config::{DEFAULT_BASE_URL, DEFAULT_CONCURRENCY};
use grand_exchange::{Catalogue, ItemId};
use std::path::PathBuf;

pub const DEFAULT_CATALOGUE: &str = "rs"; // parsed by parser
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Query prices and trends from the Grand Exchange item database.
///
/// A single id is fetched strictly and any failure is reported. Several ids are fetched
/// concurrently as a best-effort batch: items that fail are left out of the output.
#[derive(Parser, Debug)]
#[command(name = "ge", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to environment file (default: ./.env). Can also use GE_ENV_FILE.
    #[arg(
        long,
        value_hint = ValueHint::FilePath,
        default_value = ".env",
        env = "GE_ENV_FILE",
        global = true
    )]
    pub env_file: PathBuf,

    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price, trend and description of one or more items
    Item(IdsArgs),

    /// 180-day daily and average price graph of one or more items
    Graph(IdsArgs),
}

#[derive(Args, Debug)]
pub struct IdsArgs {
    /// Item ids to fetch
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<ItemId>,

    /// Print JSON on a single line
    #[arg(long, default_value = "false")]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Scheme and host of the item database
    #[arg(
        long = "base-url",
        env = "GE_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        value_hint = ValueHint::Url,
        global = true
    )]
    pub base_url: String,

    /// Item database (rs | osrs)
    #[arg(
        long = "catalogue",
        env = "GE_CATALOGUE",
        value_parser = parse_catalogue,
        default_value = DEFAULT_CATALOGUE,
        global = true
    )]
    pub catalogue: Catalogue,

    /// Maximum number of requests in flight during a batch
    #[arg(
        short = 'c',
        long = "concurrency",
        env = "GE_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY,
        global = true
    )]
    pub concurrency: usize,

    /// Timeout for each request, in seconds
    #[arg(
        long = "request-timeout",
        env = "GE_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        global = true
    )]
    pub request_timeout_secs: u64,

    /// Deadline for a whole batch, in seconds (no deadline if unset)
    #[arg(long = "batch-deadline", env = "GE_BATCH_DEADLINE_SECS", global = true)]
    pub batch_deadline_secs: Option<u64>,
}

/// Parse catalogue from string.
pub fn parse_catalogue(s: &str) -> Result<Catalogue, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "rs" | "rs3" | "runescape" => Ok(Catalogue::RuneScape),
        "osrs" | "oldschool" | "old-school" => Ok(Catalogue::OldSchool),
        other => Err(format!(
            "invalid GE_CATALOGUE '{}'; expected one of: rs, osrs",
            other
        )),
    }
}
