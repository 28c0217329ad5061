//! Favorites and cart commands.

use futures::future::join_all;
use glowcart_core::{AppConfig, NewCartItem};
use glowcart_store::AppState;

use crate::catalog::build_client;

pub(crate) fn run_favorite_toggle(state: &mut AppState, id: i64) {
    if state.favorites.toggle(id) {
        println!("Added #{id} to favorites.");
    } else {
        println!("Removed #{id} from favorites.");
    }
}

/// Lists favorites with names looked up concurrently. IDs the catalog no
/// longer knows are still listed.
pub(crate) async fn run_favorite_list(config: &AppConfig, state: &AppState) -> anyhow::Result<()> {
    let ids = state.favorites.ids();
    if ids.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    let client = build_client(config)?;
    let products = join_all(ids.iter().map(|id| client.fetch_product_by_id(*id))).await;
    for (id, product) in ids.iter().zip(products) {
        match product {
            Some(p) => println!("{id:>6}  $ {:>7.2}  {}", p.price_usd, p.name),
            None => println!("{id:>6}  (unavailable)"),
        }
    }
    Ok(())
}

/// # Errors
///
/// Fails if the product cannot be found; the cart is left unchanged.
pub(crate) async fn run_cart_add(
    config: &AppConfig,
    state: &mut AppState,
    id: i64,
    qty: u32,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let product = client
        .fetch_product_by_id(id)
        .await
        .ok_or_else(|| anyhow::anyhow!("product {id} not found"))?;
    state.cart.add(NewCartItem::from(&product), qty);
    Ok(())
}

pub(crate) fn print_cart(state: &AppState) {
    let cart = &state.cart;
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.items() {
        println!(
            "{:>6}  {:>3} x $ {:>7.2}  = $ {:>8.2}  {}",
            line.id,
            line.qty,
            line.price_usd,
            line.line_total(),
            line.name
        );
    }
    println!("{} items, subtotal $ {:.2}", cart.count(), cart.subtotal());
}
