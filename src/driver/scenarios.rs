//! Demo Scenarios
//!
//! Each scenario drives a caller-owned cache through one usage pattern.

use std::path::Path;
use std::thread;

use anyhow::{ensure, Context, Result};
use tracing::{debug, info};

use crate::cache::BoundedCache;
use crate::driver::payload::{load_lines, LineClass};

/// Slot keys used by the recycle scenario.
const RECYCLE_SLOTS: usize = 10;

// == Churn ==
/// Stores three fixed records, then overflows the cache with temporaries.
pub fn churn(cache: &BoundedCache) -> Result<usize> {
    let mut evicted = 0;
    for i in 1..=3 {
        let key = format!("key{i}");
        let value = format!("Important data {i}");
        evicted += usize::from(cache.put(&key, value).context("churn put")?.is_some());
    }

    for i in 0..10 {
        let key = format!("temp_key_{i}");
        let value = format!("temp_value_{i}");
        if let Some(old) = cache.put(&key, value).context("churn put")? {
            debug!("Evicted {} to make room for {}", String::from_utf8_lossy(&old), key);
            evicted += 1;
        }
    }

    info!("Churn finished: {} entries held, {} evicted", cache.len(), evicted);
    Ok(evicted)
}

// == File ==
/// Loads a file line by line into the cache under `<path>:<line>` keys.
///
/// Returns the number of lines stored.
pub fn file(cache: &BoundedCache, path: &Path) -> Result<usize> {
    let lines = load_lines(path)?;
    let Some(first) = lines.first() else {
        info!("{} has no lines", path.display());
        return Ok(0);
    };
    info!(
        "Processing {} string from {}",
        LineClass::of(first).as_str(),
        path.display()
    );

    for (number, line) in lines.iter().enumerate() {
        let key = format!("{}:{}", path.display(), number + 1);
        cache
            .put(&key, line.as_slice())
            .with_context(|| format!("failed to cache {key}"))?;
    }
    debug!("Stored {} lines, {} still cached", lines.len(), cache.len());
    Ok(lines.len())
}

// == Recycle ==
/// Fills slot keys, rewrites the first half and drops most of them again.
///
/// Whatever remains is released when the cache is torn down.
pub fn recycle(cache: &BoundedCache) -> Result<usize> {
    for i in 0..RECYCLE_SLOTS {
        cache
            .put(slot_key(i), format!("Allocation {i}"))
            .context("recycle fill")?;
    }
    for i in 0..5 {
        cache
            .put(slot_key(i), format!("Reallocation {i}"))
            .context("recycle rewrite")?;
    }

    let removed = (0..7).filter(|&i| cache.remove(slot_key(i))).count();
    info!("Recycle finished: removed {}, {} left", removed, cache.len());
    Ok(removed)
}

fn slot_key(i: usize) -> String {
    format!("slot_{i}")
}

// == Combined ==
pub fn combined(cache: &BoundedCache, path: Option<&Path>) -> Result<()> {
    recycle(cache)?;
    if let Some(path) = path {
        file(cache, path)?;
    }
    cache.put("combo_key", "combo_data").context("combo put")?;
    Ok(())
}

// == Stress ==
/// Summary of a concurrent stress run.
#[derive(Debug, Clone, Default)]
pub struct StressReport {
    pub workers: usize,
    pub operations: usize,
    pub largest_len_seen: usize,
}

/// Hammers the cache from `workers` threads over a shared key space.
pub fn stress(cache: &BoundedCache, workers: usize, ops_per_worker: usize) -> Result<StressReport> {
    let capacity = cache.capacity();
    // Twice the capacity so puts keep evicting while keys still collide across workers
    let key_space = capacity.saturating_mul(2);

    let largest = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| scope.spawn(move || stress_worker(cache, worker, ops_per_worker, key_space)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .try_fold(0, |acc, seen| seen.map(|seen| acc.max(seen)))
    })?;

    ensure!(
        largest <= capacity,
        "cache held {largest} entries with capacity {capacity}"
    );
    let report = StressReport {
        workers,
        operations: workers.saturating_mul(ops_per_worker),
        largest_len_seen: largest,
    };
    info!(?report, "Stress finished");
    Ok(report)
}

fn stress_worker(cache: &BoundedCache, worker: usize, ops: usize, key_space: usize) -> Result<usize> {
    let mut largest = 0;
    for op in 0..ops {
        let slot = worker.wrapping_mul(7).wrapping_add(op.wrapping_mul(13));
        let key = format!("shared_{}", slot % key_space);
        match op % 4 {
            0 | 1 => {
                cache
                    .put(&key, format!("worker_{worker}_op_{op}"))
                    .context("stress put")?;
            }
            2 => {
                cache.get(&key);
            }
            _ => {
                cache.remove(&key);
            }
        }
        largest = largest.max(cache.len());
    }
    Ok(largest)
}
