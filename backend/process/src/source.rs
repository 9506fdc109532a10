use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use tracing::info;

use crate::{
    config::SourcePolicy,
    error::SourceFetchError,
    models::{SourceRow, University},
    utils::select_rows,
};

#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<SourceRow>, SourceFetchError>;
}

/// The Hipo world universities list.
pub struct HipoSource {
    client: Client,
    url: String,
    policy: SourcePolicy,
}

impl HipoSource {
    pub fn new(client: Client, url: impl Into<String>, policy: SourcePolicy) -> Self {
        Self {
            client,
            url: url.into(),
            policy,
        }
    }
}

#[async_trait]
impl RowSource for HipoSource {
    async fn fetch_rows(&self) -> Result<Vec<SourceRow>, SourceFetchError> {
        let res = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(SourceFetchError::Status(res.status()));
        }

        let universities: Vec<University> = res.json().await?;
        let fetched = universities.len();

        let rows = select_rows(universities, &self.policy);
        info!(
            "Kept {} {} domains out of {fetched} universities",
            rows.len(),
            self.policy.jurisdiction
        );

        Ok(rows)
    }
}
