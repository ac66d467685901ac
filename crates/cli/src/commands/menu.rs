//! Catalog browsing commands.

use kopiku_core::Product;
use kopiku_core::ProductId;
use kopiku_storefront::catalog::{self, CatalogError};

use super::{bootstrap, catalog as catalog_client};

/// List the menu, optionally filtered.
#[allow(clippy::print_stdout)]
pub async fn list(
    search: &str,
    category: &str,
    bestsellers_only: bool,
    refresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _storage) = bootstrap()?;
    let client = catalog_client(&config);

    let menu = if refresh {
        client.refresh_menu().await?
    } else {
        client.menu().await?
    };

    let mut rows = catalog::filter_menu(&menu, search, category);
    if bestsellers_only {
        rows.retain(|p| p.is_bestseller);
    }

    if rows.is_empty() {
        println!("No products match.");
        return Ok(());
    }
    for product in rows {
        println!("{}", product_row(product));
    }
    Ok(())
}

/// Show one product in detail.
#[allow(clippy::print_stdout)]
pub async fn show(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _storage) = bootstrap()?;
    let client = catalog_client(&config);

    let id = ProductId::new(id);
    match client.product(&id).await {
        Ok(product) => {
            println!("{}  [{}]", product.name, product.id);
            println!("  {}", product.price);
            if !product.category.is_empty() {
                println!("  Category: {}", product.category);
            }
            if product.is_bestseller {
                println!("  Bestseller");
            }
            if !product.description.is_empty() {
                println!("  {}", product.description);
            }
            println!("  {}", product.image);
            Ok(())
        }
        Err(CatalogError::NotFound(id)) => {
            println!("No product with id {id}.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn product_row(product: &Product) -> String {
    let marker = if product.is_bestseller { "*" } else { " " };
    format!(
        "{marker} {:<4} {:<24} {:<12} {}",
        product.id, product.name, product.category, product.price
    )
}
