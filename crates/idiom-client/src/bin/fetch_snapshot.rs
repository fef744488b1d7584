//! Download the whole idiom catalogue from a running API into a JSON file.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use idiom_client::{CatalogueSnapshot, HttpIdiomApi, RetryPolicy, fetch_snapshot};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

/// `fetch-snapshot` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fetch-snapshot",
    about = "Export idioms and categories from a running catalogue API",
    version
)]
struct CliArgs {
    /// Root URL of the catalogue API.
    #[arg(long = "base-url", value_name = "url", default_value = "http://localhost:3000")]
    base_url: Url,
    /// Output file for the pretty-printed snapshot.
    #[arg(long = "output", value_name = "path", default_value = "chengyu_snapshot.json")]
    output: PathBuf,
    /// Retries after a failed fetch.
    #[arg(long = "retries", value_name = "count", default_value_t = 3)]
    retries: u32,
    /// Seconds to wait between attempts.
    #[arg(long = "retry-delay", value_name = "seconds", default_value_t = 2)]
    retry_delay_secs: u64,
    /// Per-request timeout in seconds.
    #[arg(long = "timeout", value_name = "seconds", default_value_t = 10)]
    timeout_secs: u64,
}

impl CliArgs {
    const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let api = HttpIdiomApi::new(args.base_url.clone(), Duration::from_secs(args.timeout_secs))
        .map_err(io::Error::other)?;
    let snapshot = fetch_snapshot(&api, args.retry_policy())
        .await
        .map_err(|error| io::Error::other(format!("fetch snapshot: {error}")))?;
    write_snapshot(&args.output, &snapshot)?;
    info!(
        output = %args.output.display(),
        idioms = snapshot.idioms.len(),
        major_types = snapshot.major_types.len(),
        minor_types = snapshot.minor_types.len(),
        "snapshot written"
    );
    Ok(())
}

fn write_snapshot(path: &Path, snapshot: &CatalogueSnapshot) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open output directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut json = serde_json::to_vec_pretty(snapshot).map_err(io::Error::other)?;
    json.push(b'\n');
    directory.write(Path::new(file_name), json).map_err(|error| {
        io::Error::other(format!("write snapshot '{}': {error}", path.display()))
    })
}
