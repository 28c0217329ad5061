use std::sync::Arc;

use glowcart_core::{CartItem, NewCartItem};
use serde_json::Value;

use crate::persist;
use crate::storage::KeyValueStorage;

pub const CART_KEY: &str = "cart-items";

/// Cart lines keyed by product ID, in insertion order.
///
/// Invariants: at most one line per ID, and every line has `qty >= 1`.
/// Every mutation rewrites the stored cart.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Loads the stored cart, reconstructing each entry defensively.
    /// Unreadable storage yields an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let raw: Value = persist::load_or_default(storage.as_ref(), CART_KEY);
        let items = normalize_stored_items(&raw);
        Self { storage, items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Sum of `price_usd * qty` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Adds `qty` units of `item`. An existing line has its quantity increased
    /// and its name, price and image replaced by the incoming values.
    /// Invalid prices are stored as `0.0`; `qty == 0` is a no-op.
    pub fn add(&mut self, item: NewCartItem, qty: u32) {
        if qty == 0 {
            return;
        }
        let price_usd = sanitize_price(item.price_usd);
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(qty);
                line.name = item.name;
                line.price_usd = price_usd;
                line.image = item.image;
            }
            None => self.items.push(CartItem {
                id: item.id,
                name: item.name,
                price_usd,
                image: item.image,
                qty,
            }),
        }
        self.persist();
    }

    /// Raises the quantity of an existing line. Unknown IDs are ignored.
    pub fn increment(&mut self, id: i64, step: u32) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.qty = line.qty.saturating_add(step);
            self.persist();
        }
    }

    /// Lowers the quantity of a line, removing it once it would reach zero.
    pub fn decrement(&mut self, id: i64, step: u32) {
        let Some(pos) = self.items.iter().position(|line| line.id == id) else {
            return;
        };
        if let Some(line) = self.items.get_mut(pos) {
            if line.qty > step {
                line.qty -= step;
            } else {
                self.items.remove(pos);
            }
        }
        self.persist();
    }

    /// Deletes the line for `id` regardless of quantity.
    pub fn remove_all(&mut self, id: i64) {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        persist::save(self.storage.as_ref(), CART_KEY, &self.items);
    }
}

fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price >= 0.0 {
        price
    } else {
        0.0
    }
}

/// Rebuilds cart lines from a raw stored value, tolerating older schemas.
///
/// - anything but an array yields an empty cart;
/// - entries without a usable non-zero integer `id` or a non-blank `name`
///   are discarded individually;
/// - `priceUSD` falls back to the legacy `priceEUR` field, then to `0.0`;
/// - a missing or non-positive `qty` becomes `1`;
/// - repeated IDs are merged, later fields winning and quantities summed.
#[must_use]
pub fn normalize_stored_items(raw: &Value) -> Vec<CartItem> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    let mut items: Vec<CartItem> = Vec::new();
    for entry in entries {
        let Some(item) = normalize_entry(entry) else {
            tracing::debug!(entry = %entry, "dropping malformed stored cart entry");
            continue;
        };
        match items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                let qty = line.qty.saturating_add(item.qty);
                *line = CartItem { qty, ..item };
            }
            None => items.push(item),
        }
    }
    items
}

fn normalize_entry(entry: &Value) -> Option<CartItem> {
    let id = entry.get("id").and_then(as_number).and_then(integral_id)?;

    let name = match entry.get("name") {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if name.is_empty() {
        return None;
    }

    let price_usd = entry
        .get("priceUSD")
        .filter(|v| !v.is_null())
        .or_else(|| entry.get("priceEUR"))
        .and_then(as_number)
        .map_or(0.0, sanitize_price);

    let image = entry
        .get("image")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let qty = entry
        .get("qty")
        .and_then(as_number)
        .filter(|q| *q >= 1.0)
        .map_or(1, clamp_qty);

    Some(CartItem {
        id,
        name,
        price_usd,
        image,
        qty,
    })
}

/// Non-zero whole numbers only; `1.5` or `0` are not product IDs.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn integral_id(n: f64) -> Option<i64> {
    let id = n as i64;
    (n.fract().abs() < f64::EPSILON && id != 0).then_some(id)
}

/// Truncates a stored quantity (already `>= 1`) into `u32` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_qty(q: f64) -> u32 {
    q.min(f64::from(u32::MAX)) as u32
}

/// Accepts JSON numbers and numeric strings; rejects everything non-finite.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
