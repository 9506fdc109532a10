//! # Domain Index Build
//!
//! Batch job behind the campus map: every US university domain mapped to a display name and coordinates.
//!
//! ## Data
//!
//! - Source list (Hipo world universities): name, domains, country code, state. Filtered to `US`, one domain per
//!   university (first `.edu` if any, else the first listed), lower-cased, first sighting of a domain wins.
//!
//! - Domain index (see [`bank`]): the output. Records that already have both coordinates are curated and left alone.
//!
//! - Geocode cache (see [`bank`]): `"name|locality"` to coordinates or `null`. Consulted before every lookup, never
//!   expired. Deleting the file is the only way to force a lookup again.
//!
//! ## Run
//!
//! 1. Fetch the source list. Failing here aborts the run, there is nothing to merge without it.
//!
//! 2. Load the index and the cache. Missing or broken files start empty, a broken one is copied to `.bak` first.
//!
//! 3. For each row, skip it if the index already has coordinates for the domain. No lookup, no delay.
//!
//! 4. Otherwise resolve `name + (stored city or state)` through the cache, then Nominatim. A failed lookup is
//!    logged and the row is written without coordinates.
//!
//! 5. Pause after every real network lookup. Nominatim allows ~1 request per second, we wait 1.1s.
//!
//! 6. Every 20 merged rows, save the index and the cache. An interrupted run loses at most 20 rows of work.
//!
//! 7. Final save. Failing here aborts the run.
//!
//! Rows are processed strictly one after another.

use bank::{CacheFile, DomainIndex, DomainRecord, GeocodeCache, IndexFile};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

pub mod config;
pub mod error;
pub mod geocode;
pub mod merge;
pub mod models;
pub mod source;
pub mod throttle;
pub mod utils;

use config::BuildConfig;
use error::BuildError;
use geocode::{Geocoder, Resolver};
use merge::{RowOutcome, reconcile};
use models::SourceRow;
use source::RowSource;
use throttle::Throttle;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub rows: usize,
    pub skipped: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub domains: usize,
}

impl BuildSummary {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::SkippedCurated => self.skipped += 1,
            RowOutcome::Resolved => self.resolved += 1,
            RowOutcome::Unresolved { failed } => {
                self.unresolved += 1;
                if failed {
                    self.failed += 1;
                }
            }
        }
    }
}

pub async fn build_index<S, G>(
    config: &BuildConfig,
    source: &S,
    resolver: &Resolver<G>,
) -> Result<BuildSummary, BuildError>
where
    S: RowSource,
    G: Geocoder,
{
    println!("Building domain index...");

    let rows = source.fetch_rows().await?;

    let index_file = IndexFile::new(&config.index_path);
    let cache_file = CacheFile::new(&config.cache_path);
    let throttle = Throttle::new(config.throttle);

    let mut index = index_file.load();
    let mut cache = cache_file.load();

    println!("Source Rows: {}", rows.len());
    println!("Loaded Domains: {}", index.len());
    println!("Loaded Geocodes: {}\n", cache.len());

    let mut summary = BuildSummary {
        rows: rows.len(),
        ..Default::default()
    };
    let mut merged = 0;

    let pb = progress_bar(rows.len());

    for row in &rows {
        pb.set_message(row.domain.clone());

        let outcome = merge_row(&mut index, &mut cache, row, resolver, &throttle).await;
        summary.record(outcome);
        pb.inc(1);

        #[cfg(feature = "verbose")]
        println!("{:?} {}", outcome, row.domain);

        if outcome == RowOutcome::SkippedCurated {
            continue;
        }

        merged += 1;
        if config.checkpoint_every > 0 && merged % config.checkpoint_every == 0 {
            pb.println(format!("Processed {merged} / {}...", rows.len()));
            checkpoint(&index_file, &index, &cache_file, &cache);
        }
    }

    pb.finish_with_message("Done");

    cache_file.save(&cache)?;
    index_file.save(&index)?;

    summary.domains = index.len();

    println!("\nSkipped (curated): {}", summary.skipped);
    println!("Resolved: {}", summary.resolved);
    println!("Unresolved: {} ({} failed)", summary.unresolved, summary.failed);
    println!("Done. Domains in index: {}", summary.domains);

    Ok(summary)
}

async fn merge_row<G: Geocoder>(
    index: &mut DomainIndex,
    cache: &mut GeocodeCache,
    row: &SourceRow,
    resolver: &Resolver<G>,
    throttle: &Throttle,
) -> RowOutcome {
    let existing = index.get(&row.domain);

    if existing.is_some_and(DomainRecord::is_curated) {
        return RowOutcome::SkippedCurated;
    }

    let locality = existing
        .and_then(|record| record.city.as_deref())
        .filter(|city| !city.is_empty())
        .unwrap_or(row.locality.as_str())
        .to_string();

    let (resolved, failed) = match resolver.resolve(&row.name, &locality, cache).await {
        Ok(lookup) => {
            if lookup.fetched {
                throttle.pause().await;
            }
            (lookup.coordinates, false)
        }
        Err(e) => {
            warn!("Geocode failed for {} {}: {e}", row.name, row.domain);
            throttle.pause().await;
            (None, true)
        }
    };

    let record = reconcile(index.get(&row.domain), row, resolved);
    index.insert(row.domain.clone(), record);

    match resolved {
        Some(_) => RowOutcome::Resolved,
        None => RowOutcome::Unresolved { failed },
    }
}

/// Mid-run saves are best effort: a failure is reported and the run goes on.
fn checkpoint(
    index_file: &IndexFile,
    index: &DomainIndex,
    cache_file: &CacheFile,
    cache: &GeocodeCache,
) {
    if let Err(e) = cache_file.save(cache) {
        error!("Checkpoint failed: {e}");
    }

    match index_file.save(index) {
        Ok(()) => info!("Checkpoint: {} domains saved", index.len()),
        Err(e) => error!("Checkpoint failed: {e}"),
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);

    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(style.progress_chars("=> "));
    }

    pb
}
