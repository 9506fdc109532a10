//! # Bank
//!
//! Durable storage for the university domain index and the geocode cache.
//!
//! ## Files
//!
//! - Domain index (**domain** to **record**): lower-cased domain as the key, `{name, lat, lng, city?}` as the value.
//!   `lat`/`lng` are `null` until resolved. A record holding both coordinates is curated and never overwritten.
//!
//! - Geocode cache (**"name|locality"** to **coordinates or null**): memoized lookups. A `null` value is a real
//!   entry meaning the geocoder had nothing, so the same query is never sent twice.
//!
//! Both are pretty-printed JSON maps with sorted keys so reruns diff cleanly.
//!
//! ## Writes
//!
//! Whole-file replace only. The new contents land in a sibling `.tmp` file first and are renamed over the old one,
//! so an interrupted write never leaves a half-written index behind.

pub mod error;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use records::{Coordinates, DomainIndex, DomainRecord, GeocodeCache};
pub use store::{CacheFile, IndexFile, JsonFile};

pub const INDEX_PATH: &str = "data/domain_index.json";
pub const GEOCODE_CACHE_PATH: &str = "cache/geocode.json";
