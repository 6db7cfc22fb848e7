//! LRU Vault - A bounded, thread-safe in-memory cache
//!
//! Demo binary: runs one scenario against an owned cache and prints its statistics.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_vault::driver::{self, Invocation};
use lru_vault::{BoundedCache, CacheConfig};

#[derive(Parser)]
#[command(name = "lru_vault")]
#[command(about = "Run a cache demo scenario", long_about = None)]
struct Args {
    /// Scenario: 1 churn, 2 file, 3 recycle, 4 combined, 5 stress
    #[arg(required_unless_present = "stdin", allow_negative_numbers = true)]
    mode: Option<i64>,

    /// Input file for modes 2 and 4
    file: Option<PathBuf>,

    /// Read `<mode> [file]` from the first line of stdin instead
    #[arg(long, conflicts_with_all = ["mode", "file"])]
    stdin: bool,
}

impl Args {
    fn invocation(self) -> Result<Invocation> {
        if self.stdin {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read stdin")?;
            return Invocation::parse_line(&line);
        }
        let mode = self.mode.context("missing mode")?;
        Ok(Invocation::new(mode, self.file))
    }
}

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse arguments and load configuration from environment variables
/// 3. Create the cache, run the scenario, print stats
/// 4. Drop the cache, releasing every remaining entry
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_vault=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let invocation = Args::parse().invocation()?;

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: capacity={}, workers={}, ops_per_worker={}",
        config.capacity, config.workers, config.ops_per_worker
    );

    let cache = BoundedCache::from_config(&config).context("failed to create cache")?;
    if let Err(err) = driver::run(&cache, &invocation, &config) {
        error!("Run failed: {:#}", err);
        return Err(err);
    }

    let stats = cache.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    drop(cache);
    info!("Cache released");
    Ok(())
}
