use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use bank::{GEOCODE_CACHE_PATH, INDEX_PATH};
use clap::Parser;
use process::{
    build_index,
    config::{BuildConfig, CHECKPOINT_EVERY, SourcePolicy, THROTTLE_MILLIS},
    geocode::{Nominatim, Resolver},
    models::{GEOCODE_ENDPOINT, SOURCE_ENDPOINT, USER_AGENT},
    source::HipoSource,
};
use reqwest::Client;
use tracing_subscriber::{EnvFilter, fmt};

/// Builds the university domain index, geocoding whatever is missing.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "INDEX_PATH", default_value = INDEX_PATH)]
    index: PathBuf,

    #[arg(long, env = "GEOCODE_CACHE_PATH", default_value = GEOCODE_CACHE_PATH)]
    cache: PathBuf,

    #[arg(long, env = "SOURCE_URL", default_value = SOURCE_ENDPOINT)]
    source_url: String,

    #[arg(long, env = "GEOCODE_URL", default_value = GEOCODE_ENDPOINT)]
    geocode_url: String,

    /// Pause after each geocoder request, in milliseconds.
    #[arg(long, env = "THROTTLE_MS", default_value_t = THROTTLE_MILLIS)]
    throttle_ms: u64,

    /// Save progress every N merged rows.
    #[arg(long, env = "CHECKPOINT_EVERY", default_value_t = CHECKPOINT_EVERY)]
    checkpoint_every: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = BuildConfig {
        index_path: args.index,
        cache_path: args.cache,
        source_url: args.source_url,
        geocode_url: args.geocode_url,
        user_agent: USER_AGENT.to_string(),
        throttle: Duration::from_millis(args.throttle_ms),
        checkpoint_every: args.checkpoint_every,
        policy: SourcePolicy::default(),
    };

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let source = HipoSource::new(client.clone(), &config.source_url, config.policy.clone());
    let resolver = Resolver::new(Nominatim::new(
        client,
        &config.geocode_url,
        &config.user_agent,
    ));

    build_index(&config, &source, &resolver)
        .await
        .context("Domain index build failed")?;

    Ok(())
}
