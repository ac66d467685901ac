//! Remote catalog client.
//!
//! Fetches the coffee menu from the mock catalog API and caches responses
//! in-memory with a TTL. The catalog is read-only: products are owned by
//! the remote service, and unlike the cart store this boundary surfaces
//! its failures to callers as typed errors.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;
use url::Url;

use kopiku_core::{Product, ProductId};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog has no product with this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Menu,
    Product(ProductId),
}

/// Cached response payloads.
#[derive(Debug, Clone)]
enum CacheValue {
    Menu(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

/// HTTP client for the remote product catalog.
///
/// Menu and product responses are cached for the configured TTL.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a client for the catalog collection at `base_url`.
    ///
    /// `cache_ttl` bounds how long menu and product responses are reused
    /// before the remote service is asked again.
    #[must_use]
    pub fn new(base_url: Url, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(cache_ttl)
            .build();

        Self {
            http: reqwest::Client::new(),
            base_url,
            cache,
        }
    }

    /// Fetch the full menu, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] when the request or decoding fails.
    pub async fn menu(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(CacheValue::Menu(menu)) = self.cache.get(&CacheKey::Menu).await {
            return Ok(menu);
        }

        debug!(url = %self.base_url, "Fetching menu from catalog");
        let products: Vec<Product> = self
            .http
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let menu = Arc::new(products);
        self.cache
            .insert(CacheKey::Menu, CacheValue::Menu(Arc::clone(&menu)))
            .await;
        Ok(menu)
    }

    /// Drop any cached menu and fetch it again (pull-to-refresh).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] when the request or decoding fails.
    pub async fn refresh_menu(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        self.cache.invalidate(&CacheKey::Menu).await;
        self.menu().await
    }

    /// Fetch a single product by id, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id and
    /// [`CatalogError::Http`] for transport or decoding failures.
    pub async fn product(&self, id: &ProductId) -> Result<Arc<Product>, CatalogError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            return Ok(product);
        }

        let url = product_url(&self.base_url, id);
        debug!(url = %url, "Fetching product from catalog");
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.clone()));
        }
        let product: Product = response.error_for_status()?.json().await?;

        let product = Arc::new(product);
        self.cache
            .insert(key, CacheValue::Product(Arc::clone(&product)))
            .await;
        Ok(product)
    }

    /// Fetch the menu and keep only the bestseller rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] when the menu fetch fails.
    pub async fn bestsellers(&self) -> Result<Vec<Product>, CatalogError> {
        let menu = self.menu().await?;
        Ok(bestsellers(&menu).into_iter().cloned().collect())
    }
}

fn product_url(base: &Url, id: &ProductId) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), id)
}

/// Products flagged as bestsellers, in menu order.
#[must_use]
pub fn bestsellers(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_bestseller).collect()
}

/// Filter a fetched menu by a search query and a category.
///
/// The query matches case-insensitively against product names; the
/// category matches case-insensitively against product categories, with
/// `"All"` (or an empty string) selecting everything.
#[must_use]
pub fn filter_menu<'a>(products: &'a [Product], query: &str, category: &str) -> Vec<&'a Product> {
    let query = query.to_lowercase();
    let category = category.to_lowercase();
    let all_categories = category.is_empty() || category == "all";

    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&query))
        .filter(|p| all_categories || p.category.to_lowercase() == category)
        .collect()
}
