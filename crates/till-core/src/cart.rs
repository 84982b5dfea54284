//! # Cart Ledger
//!
//! The in-memory cart: one line per product, quantities bounded by stock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Frontend Action          Ledger Call             Ledger Change         │
//! │  ───────────────          ───────────             ─────────────         │
//! │                                                                         │
//! │  Click Product ──────────► add_line() ─────────► push or qty + 1       │
//! │                                                  (bounded by stock)     │
//! │                                                                         │
//! │  Click "+" ──────────────► increment() ────────► qty + 1 (bounded)     │
//! │                                                                         │
//! │  Click "−" ──────────────► decrement() ────────► qty − 1, drop at 0    │
//! │                                                                         │
//! │  Confirm Clear ──────────► clear() ────────────► lines.clear()         │
//! │                                                                         │
//! │  Catalog Reload ─────────► reconcile() ────────► fresh snapshots,      │
//! │                                                  clamp to new stock     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has `1 <= quantity <= product.stock`
//! - Insertion order is display order
//! - The total is recomputed on every call, never cached

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Product, ProductId};

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartLedger { lines: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Already in cart: +1 only while `quantity < product.stock`, otherwise
    ///   `StockExceeded`. The line's snapshot is refreshed from `product`.
    /// - Not in cart: new line with quantity 1 if `product.stock > 0`,
    ///   otherwise `OutOfStock`.
    ///
    /// On error the ledger is unchanged.
    ///
    /// ## Returns
    /// The line's new quantity.
    pub fn add_line(&mut self, product: &Product) -> CoreResult<u32> {
        if let Some(line) = self.line_mut(product.id) {
            if line.quantity >= product.stock {
                return Err(CoreError::StockExceeded {
                    name: product.name.clone(),
                    available: product.stock,
                });
            }
            line.product = product.clone();
            line.quantity += 1;
            return Ok(line.quantity);
        }

        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        Ok(1)
    }

    /// Adds one unit to an existing line, bounded by the line's stock.
    ///
    /// Absent ids and lines already at their stock bound are ignored.
    ///
    /// ## Returns
    /// `true` if the quantity changed.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.line_mut(product_id) {
            Some(line) if line.quantity < line.product.stock => {
                line.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Removes one unit; the line disappears when it reaches zero.
    ///
    /// ## Returns
    /// `true` if the ledger changed.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        let line = &mut self.lines[index];
        line.quantity -= 1;
        if line.quantity == 0 {
            self.lines.remove(index);
        }
        true
    }

    /// Drops a product's line outright.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != before
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ(quantity × price) over all lines, at full precision.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Brings every line in step with a freshly fetched catalog.
    ///
    /// Snapshots are replaced, quantities clamped to the new stock, and lines
    /// whose product disappeared or sold out are dropped.
    ///
    /// ## Returns
    /// Ids of the lines that were clamped or dropped.
    pub fn reconcile(&mut self, catalog: &[Product]) -> Vec<ProductId> {
        let mut touched = Vec::new();

        self.lines.retain_mut(|line| {
            let Some(fresh) = catalog.iter().find(|p| p.id == line.product.id) else {
                touched.push(line.product.id);
                return false;
            };

            line.product = fresh.clone();
            if line.quantity > fresh.stock {
                touched.push(fresh.id);
                line.quantity = fresh.stock;
            }
            line.quantity > 0
        });

        touched
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Returns the number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }
}

/// Cart totals summary for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u32,
    #[ts(type = "number")]
    pub total: Money,
}

impl From<&CartLedger> for CartTotals {
    fn from(cart: &CartLedger) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price_cents: i64, stock: u32) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            stock,
        }
    }

    fn assert_invariants(cart: &CartLedger) {
        for (i, line) in cart.lines().iter().enumerate() {
            assert!(line.quantity >= 1, "zero-quantity line {:?}", line);
            assert!(line.quantity <= line.product.stock, "over stock {:?}", line);
            assert!(
                cart.lines()[i + 1..].iter().all(|o| o.product.id != line.product.id),
                "duplicate line for {}",
                line.product.id
            );
        }
    }

    #[test]
    fn test_add_twice_then_stock_exceeded() {
        let mut cart = CartLedger::new();
        let p = product(1, 1000, 2);

        assert_eq!(cart.add_line(&p).unwrap(), 1);
        assert_eq!(cart.add_line(&p).unwrap(), 2);
        assert_eq!(cart.total(), Money::from_cents(2000));
        assert_eq!(cart.line_count(), 1);

        let err = cart.add_line(&p).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                name: "Product 1".to_string(),
                available: 2
            }
        );
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.total().to_string(), "20.00");
    }

    #[test]
    fn test_out_of_stock_leaves_cart_unchanged() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(1, 100, 5)).unwrap();
        let before = cart.clone();

        let err = cart.add_line(&product(2, 100, 0)).unwrap_err();

        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_is_bounded_and_ignores_absent() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(1, 100, 2)).unwrap();

        assert!(cart.increment(1));
        assert!(!cart.increment(1));
        assert!(!cart.increment(42));
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_decrement_removes_line_at_zero() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(1, 100, 5)).unwrap();
        cart.add_line(&product(2, 100, 5)).unwrap();
        cart.add_line(&product(2, 100, 5)).unwrap();

        assert!(cart.decrement(2));
        assert_eq!(cart.line(2).unwrap().quantity, 1);

        assert!(cart.decrement(1));
        assert!(cart.line(1).is_none());
        assert!(!cart.decrement(1));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(3, 100, 5)).unwrap();
        cart.add_line(&product(1, 100, 5)).unwrap();
        cart.add_line(&product(3, 100, 5)).unwrap();

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_total_is_order_independent() {
        let a = product(1, 335, 10);
        let b = product(2, 1999, 10);

        let mut first = CartLedger::new();
        first.add_line(&a).unwrap();
        first.add_line(&b).unwrap();
        first.add_line(&a).unwrap();

        let mut second = CartLedger::new();
        second.add_line(&b).unwrap();
        second.add_line(&a).unwrap();
        second.increment(1);

        assert_eq!(first.total(), second.total());
        assert_eq!(first.total(), first.total());
        assert_eq!(first.total(), Money::from_cents(335 * 2 + 1999));
    }

    #[test]
    fn test_random_sequences_keep_invariants() {
        let catalog: Vec<Product> = (1..=4).map(|id| product(id, 100 * id, (id as u32) - 1)).collect();
        let mut cart = CartLedger::new();

        // Small LCG keeps the sequence deterministic.
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..2_000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = &catalog[((seed >> 33) % catalog.len() as u64) as usize];
            match (seed >> 40) % 3 {
                0 => {
                    let _ = cart.add_line(pick);
                }
                1 => {
                    cart.increment(pick.id);
                }
                _ => {
                    cart.decrement(pick.id);
                }
            }
            assert_invariants(&cart);

            let expected: Money = cart.lines().iter().map(|l| l.product.price * l.quantity).sum();
            assert_eq!(cart.total(), expected);
        }
    }

    #[test]
    fn test_reconcile_clamps_and_drops() {
        let mut cart = CartLedger::new();
        let tea = product(1, 350, 5);
        let bread = product(2, 800, 5);
        let gone = product(3, 100, 5);
        for _ in 0..4 {
            cart.add_line(&tea).unwrap();
        }
        cart.add_line(&bread).unwrap();
        cart.add_line(&gone).unwrap();

        let fresh = vec![product(1, 400, 2), product(2, 800, 5)];
        let touched = cart.reconcile(&fresh);

        assert_eq!(touched, vec![1, 3]);
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.line(1).unwrap().product.price, Money::from_cents(400));
        assert!(cart.line(3).is_none());
        assert_invariants(&cart);
    }

    #[test]
    fn test_reconcile_drops_sold_out() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(1, 350, 5)).unwrap();

        let touched = cart.reconcile(&[product(1, 350, 0)]);

        assert_eq!(touched, vec![1]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_and_totals() {
        let mut cart = CartLedger::new();
        cart.add_line(&product(1, 350, 5)).unwrap();
        cart.add_line(&product(1, 350, 5)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.total, Money::from_cents(700));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }
}
