//! Demo Driver Module
//!
//! Selects a scenario from a numeric mode and runs it against a caller-owned cache.
//!
//! # Modes
//! - `1` - Churn: overflow the cache with temporaries
//! - `2` - File: cache a file's lines (no-op without a path)
//! - `3` - Recycle: fill, rewrite and remove slot keys
//! - `4` - Combined: recycle, optional file, then a single put
//! - `5` - Stress: concurrent mixed operations

pub mod payload;
pub mod scenarios;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cache::BoundedCache;
use crate::config::CacheConfig;

// == Mode ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Churn,
    File,
    Recycle,
    Combined,
    Stress,
    Unknown(i64),
}

impl From<i64> for Mode {
    fn from(value: i64) -> Self {
        match value {
            1 => Mode::Churn,
            2 => Mode::File,
            3 => Mode::Recycle,
            4 => Mode::Combined,
            5 => Mode::Stress,
            other => Mode::Unknown(other),
        }
    }
}

// == Invocation ==
/// A parsed `<mode> [file]` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub file: Option<PathBuf>,
}

impl Invocation {
    pub fn new(mode: i64, file: Option<PathBuf>) -> Self {
        Self {
            mode: Mode::from(mode),
            file,
        }
    }

    /// Parses a single `<mode> [file]` line, as fed on stdin.
    ///
    /// Extra words after the path are ignored.
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let mode = words
            .next()
            .context("expected `<mode> [file]`, got an empty line")?;
        let mode: i64 = mode
            .parse()
            .with_context(|| format!("mode must be an integer, got `{mode}`"))?;
        Ok(Self::new(mode, words.next().map(PathBuf::from)))
    }
}

// == Run ==
/// Runs one invocation to completion.
pub fn run(cache: &BoundedCache, invocation: &Invocation, config: &CacheConfig) -> Result<()> {
    let file = invocation.file.as_deref();
    info!("Running {:?} against a cache of {}", invocation.mode, cache.capacity());

    match invocation.mode {
        Mode::Churn => {
            scenarios::churn(cache)?;
        }
        Mode::File => match file {
            Some(path) => {
                scenarios::file(cache, path)?;
            }
            None => warn!("File mode without a path, nothing to do"),
        },
        Mode::Recycle => {
            scenarios::recycle(cache)?;
        }
        Mode::Combined => scenarios::combined(cache, file)?,
        Mode::Stress => {
            scenarios::stress(cache, config.workers, config.ops_per_worker)?;
        }
        Mode::Unknown(mode) => warn!("Unknown mode {}, nothing to do", mode),
    }
    Ok(())
}
