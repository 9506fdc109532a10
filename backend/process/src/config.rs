use std::{path::PathBuf, time::Duration};

use bank::{GEOCODE_CACHE_PATH, INDEX_PATH};

use crate::models::{GEOCODE_ENDPOINT, SOURCE_ENDPOINT, USER_AGENT};

pub const THROTTLE_MILLIS: u64 = 1100;
pub const CHECKPOINT_EVERY: usize = 20;

#[derive(Debug, Clone)]
pub struct SourcePolicy {
    pub jurisdiction: String,
    pub preferred_suffix: String,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self {
            jurisdiction: "US".to_string(),
            preferred_suffix: ".edu".to_string(),
        }
    }
}

/// Everything a run needs, handed to each component up front.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub index_path: PathBuf,
    pub cache_path: PathBuf,
    pub source_url: String,
    pub geocode_url: String,
    pub user_agent: String,
    pub throttle: Duration,
    pub checkpoint_every: usize,
    pub policy: SourcePolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            index_path: INDEX_PATH.into(),
            cache_path: GEOCODE_CACHE_PATH.into(),
            source_url: SOURCE_ENDPOINT.to_string(),
            geocode_url: GEOCODE_ENDPOINT.to_string(),
            user_agent: USER_AGENT.to_string(),
            throttle: Duration::from_millis(THROTTLE_MILLIS),
            checkpoint_every: CHECKPOINT_EVERY,
            policy: SourcePolicy::default(),
        }
    }
}
