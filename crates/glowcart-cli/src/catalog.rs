//! Catalog listing and product detail commands.

use glowcart_catalog::{
    empty_message, refine, BrowseQuery, CatalogBrowser, CategoryFilter, MakeupClient,
};
use glowcart_core::{AppConfig, Product};
use glowcart_store::AppState;

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<MakeupClient> {
    MakeupClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

/// Loads the listing for the category, then applies search and the
/// favorites-only view locally.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the catalog load
/// failed; the message is the one the listing would show.
pub(crate) async fn run_products(
    config: &AppConfig,
    state: &mut AppState,
    filter: CategoryFilter,
    search: String,
    only_favorites: bool,
) -> anyhow::Result<()> {
    let browser = CatalogBrowser::new(build_client(config)?);
    let query = BrowseQuery { filter, search };
    browser.load(&query).await;

    let listing = browser.state();
    if let Some(message) = listing.error {
        anyhow::bail!(message);
    }

    state.favorites.set_only_favorites(only_favorites);
    let favorites = &state.favorites;
    let shown = refine(
        &listing.items,
        &query,
        |id| favorites.has(id),
        favorites.show_only_favorites(),
    );

    if shown.is_empty() {
        println!("{}", empty_message(&query, favorites.show_only_favorites()));
        return Ok(());
    }

    for product in &shown {
        let marker = if favorites.has(product.id) { '*' } else { ' ' };
        println!(
            "{marker} {:>6}  {:<5}  $ {:>7.2}  {}",
            product.id,
            product.category.as_str(),
            product.price_usd,
            product.name
        );
    }
    println!("{} products", shown.len());
    Ok(())
}

/// # Errors
///
/// Returns an error only if the client cannot be built. A missing product
/// is reported, not failed.
pub(crate) async fn run_product(config: &AppConfig, state: &AppState, id: i64) -> anyhow::Result<()> {
    let client = build_client(config)?;
    match client.fetch_product_by_id(id).await {
        Some(product) => print_product(&product, state),
        None => println!("Product not found."),
    }
    Ok(())
}

fn print_product(product: &Product, state: &AppState) {
    println!("{} (#{})", product.name, product.id);
    println!("  category:  {}", product.category);
    println!("  price:     $ {:.2}", product.price_usd);
    if let Some(image) = &product.image {
        println!("  image:     {image}");
    }
    if state.favorites.has(product.id) {
        println!("  favorited");
    }
    if let Some(line) = state.cart.get(product.id) {
        println!("  in cart:   {}", line.qty);
    }
}
