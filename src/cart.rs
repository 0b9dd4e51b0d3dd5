use crate::catalog::{self, format_mt};
use crate::models::{CartLineView, CartView};
use serde::{Deserialize, Serialize};

/// Upper bound for a single line's quantity.
pub const MAX_QUANTITY: u64 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: u32,
    pub quantity: u64,
}

/// The in-progress order. Lines keep insertion order; quantities are always
/// at least 1 (dropping to zero removes the line).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Adds one unit of a catalog product. A product already in the cart
    /// gets its quantity bumped instead of a duplicate line.
    pub fn add(&mut self, product_id: u32) -> Result<(), &'static str> {
        if catalog::find(product_id).is_none() {
            return Err("Produto não encontrado.");
        }
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product_id,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Zero or negative removes the line; unknown ids are a no-op. The
    /// quantity comes straight off the wire, so it is clamped to
    /// [`MAX_QUANTITY`].
    pub fn set_quantity(&mut self, product_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.product_id == product_id) {
            item.quantity = (quantity as u64).min(MAX_QUANTITY);
        }
    }

    pub fn remove(&mut self, product_id: u32) {
        self.items.retain(|item| item.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |count, item| count.saturating_add(item.quantity))
    }

    /// Saturating: a hand-edited cart file with absurd quantities must not
    /// panic the request that renders it.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .filter_map(|item| {
                catalog::find(item.product_id)
                    .map(|product| product.price.saturating_mul(item.quantity))
            })
            .fold(0u64, |total, line| total.saturating_add(line))
    }

    /// Rendered cart for the page. Lines whose product id no longer exists
    /// in the catalog (stale persisted data) are skipped.
    pub fn view(&self) -> CartView {
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                let product = catalog::find(item.product_id)?;
                let line_total = product.price.saturating_mul(item.quantity);
                Some(CartLineView {
                    product_id: product.id,
                    name: product.name,
                    glyph: product.glyph,
                    price: product.price,
                    price_display: format_mt(product.price),
                    quantity: item.quantity,
                    line_total,
                    line_total_display: format_mt(line_total),
                })
            })
            .collect();

        CartView {
            items,
            item_count: self.item_count(),
            total: self.total(),
            total_display: format_mt(self.total()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_same_product_twice_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.add(1).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn adding_unknown_product_is_rejected() {
        let mut cart = Cart::default();
        assert!(cart.add(99).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn zero_or_negative_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.add(2).unwrap();

        cart.set_quantity(1, 0);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, 2);

        cart.set_quantity(2, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_updates_existing_line_only() {
        let mut cart = Cart::default();
        cart.add(3).unwrap();
        cart.set_quantity(3, 5);
        assert_eq!(cart.items[0].quantity, 5);

        cart.set_quantity(4, 2);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add(1).unwrap(); // 450
        cart.add(1).unwrap();
        cart.add(9).unwrap(); // 680
        assert_eq!(cart.total(), 450 * 2 + 680);

        let view = cart.view();
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total, 1580);
        assert_eq!(view.total_display, "1.580 MT");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn wire_quantity_is_clamped() {
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.set_quantity(1, i64::MAX);
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY);
        assert_eq!(cart.total(), 450 * MAX_QUANTITY);
    }

    #[test]
    fn absurd_stored_quantity_does_not_panic() {
        let cart = Cart {
            items: vec![
                CartItem {
                    product_id: 1,
                    quantity: u64::MAX,
                },
                CartItem {
                    product_id: 2,
                    quantity: u64::MAX,
                },
            ],
        };
        assert_eq!(cart.total(), u64::MAX);
        assert_eq!(cart.item_count(), u64::MAX);
        let view = cart.view();
        assert_eq!(view.items[0].line_total, u64::MAX);
        assert_eq!(view.total, u64::MAX);
    }

    #[test]
    fn view_skips_stale_product_ids() {
        let cart = Cart {
            items: vec![
                CartItem {
                    product_id: 1,
                    quantity: 1,
                },
                CartItem {
                    product_id: 42,
                    quantity: 7,
                },
            ],
        };
        let view = cart.view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total, 450);
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut cart = Cart::default();
        cart.add(5).unwrap();
        cart.add(5).unwrap();
        cart.add(7).unwrap();

        let payload = serde_json::to_vec_pretty(&cart).unwrap();
        let reloaded: Cart = serde_json::from_slice(&payload).unwrap();
        assert_eq!(reloaded, cart);
    }
}
