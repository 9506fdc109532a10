use async_trait::async_trait;
use bank::{Coordinates, GeocodeCache};
use reqwest::{Client, header::ACCEPT};

use crate::{
    error::GeocodeError,
    models::Candidate,
    utils::{cache_key, query_text},
};

/// Free-text place search, first ranked hit only.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

pub struct Nominatim {
    client: Client,
    url: String,
    user_agent: String,
}

impl Nominatim {
    pub fn new(client: Client, url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    async fn search(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let res = self
            .client
            .get(&self.url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .header(ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(GeocodeError::Http)?;

        if !res.status().is_success() {
            return Err(GeocodeError::Status(res.status()));
        }

        let candidates: Vec<Candidate> = res.json().await.map_err(GeocodeError::Decode)?;

        let Some(first) = candidates.first() else {
            return Ok(None);
        };

        match (first.lat.parse(), first.lon.parse()) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates { lat, lng })),
            _ => Err(GeocodeError::Coordinate {
                query: query.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    pub coordinates: Option<Coordinates>,
    /// The geocoder was actually called.
    pub fetched: bool,
}

pub struct Resolver<G> {
    geocoder: G,
}

impl<G: Geocoder> Resolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Cache first. A miss costs exactly one geocoder call and its outcome,
    /// empty or not, is memoized before returning. Errors are not cached.
    pub async fn resolve(
        &self,
        name: &str,
        locality: &str,
        cache: &mut GeocodeCache,
    ) -> Result<Lookup, GeocodeError> {
        let key = cache_key(name, locality);

        if let Some(cached) = cache.get(&key) {
            return Ok(Lookup {
                coordinates: *cached,
                fetched: false,
            });
        }

        let coordinates = self.geocoder.search(&query_text(name, locality)).await?;
        cache.insert(key, coordinates);

        Ok(Lookup {
            coordinates,
            fetched: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use reqwest::StatusCode;

    use super::*;

    struct Counting {
        calls: Arc<AtomicUsize>,
        answer: Option<Coordinates>,
        fail: bool,
    }

    #[async_trait]
    impl Geocoder for Counting {
        async fn search(&self, _query: &str) -> Result<Option<Coordinates>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return Err(GeocodeError::Status(StatusCode::TOO_MANY_REQUESTS));
            }
            Ok(self.answer)
        }
    }

    fn resolver(answer: Option<Coordinates>, fail: bool) -> (Resolver<Counting>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let geocoder = Counting {
            calls: calls.clone(),
            answer,
            fail,
        };

        (Resolver::new(geocoder), calls)
    }

    const LA: Coordinates = Coordinates {
        lat: 34.0,
        lng: -118.0,
    };

    #[tokio::test]
    async fn test_miss_fetches_once_then_hits() {
        let (resolver, calls) = resolver(Some(LA), false);
        let mut cache = GeocodeCache::new();

        let first = resolver.resolve("Example University", "CA", &mut cache).await.unwrap();
        assert_eq!(
            first,
            Lookup {
                coordinates: Some(LA),
                fetched: true
            }
        );
        assert_eq!(cache.get("Example University|CA"), Some(&Some(LA)));

        let second = resolver.resolve("Example University", "CA", &mut cache).await.unwrap();
        assert!(!second.fetched);
        assert_eq!(second.coordinates, Some(LA));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_null_entry_short_circuits() {
        let (resolver, calls) = resolver(Some(LA), false);
        let mut cache = GeocodeCache::new();
        cache.insert("Nowhere College|".to_string(), None);

        let lookup = resolver.resolve("Nowhere College", "", &mut cache).await.unwrap();

        assert_eq!(
            lookup,
            Lookup {
                coordinates: None,
                fetched: false
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_memoized() {
        let (resolver, calls) = resolver(None, false);
        let mut cache = GeocodeCache::new();

        let lookup = resolver.resolve("Ghost College", "NV", &mut cache).await.unwrap();
        assert!(lookup.fetched);
        assert_eq!(lookup.coordinates, None);
        assert_eq!(cache.get("Ghost College|NV"), Some(&None));

        resolver.resolve("Ghost College", "NV", &mut cache).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (resolver, calls) = resolver(Some(LA), true);
        let mut cache = GeocodeCache::new();

        let err = resolver.resolve("Busy University", "TX", &mut cache).await.unwrap_err();
        assert!(matches!(err, GeocodeError::Status(StatusCode::TOO_MANY_REQUESTS)));
        assert!(cache.is_empty());

        assert!(resolver.resolve("Busy University", "TX", &mut cache).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
