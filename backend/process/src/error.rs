use bank::StoreError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceFetchError {
    #[error("Failed to fetch domains list: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch domains list: {0}")]
    Status(StatusCode),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocode request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("geocode http {0}")]
    Status(StatusCode),

    #[error("geocode response unreadable: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("geocode returned unparsable coordinates for {query:?}")]
    Coordinate { query: String },
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Source(#[from] SourceFetchError),

    #[error("Final save failed: {0}")]
    Store(#[from] StoreError),
}
