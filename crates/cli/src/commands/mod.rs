//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod menu;

use std::sync::Arc;

use kopiku_storefront::cart::CartStore;
use kopiku_storefront::catalog::CatalogClient;
use kopiku_storefront::config::{AppConfig, ConfigError};
use kopiku_storefront::storage::FileStorage;

/// Load config and build the file-backed storage every command shares.
pub(crate) fn bootstrap() -> Result<(AppConfig, Arc<FileStorage>), ConfigError> {
    let config = AppConfig::from_env()?;
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    Ok((config, storage))
}

/// Catalog client from config.
pub(crate) fn catalog(config: &AppConfig) -> CatalogClient {
    CatalogClient::new(config.catalog_url.clone(), config.cache_ttl)
}

/// Open the persisted cart store.
pub(crate) async fn open_cart(storage: Arc<FileStorage>) -> CartStore {
    CartStore::open(storage).await
}
