use std::sync::Arc;

use super::{config::Config, error::AppError, store::CollectionStore};

pub struct AppState {
    pub config: Config,
    pub store: CollectionStore,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let store = CollectionStore::open(&config.data_dir).await?;

        Ok(Arc::new(Self { config, store }))
    }
}
