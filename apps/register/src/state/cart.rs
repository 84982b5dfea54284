//! # Cart State
//!
//! Holds the session's [`CartLedger`].
//!
//! ## Thread Safety
//! The ledger sits behind `Arc<Mutex<_>>`. Locks are held only for the
//! duration of a closure, never across an `.await`.

use std::sync::{Arc, Mutex, PoisonError};

use till_core::CartLedger;

/// Thread-safe cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<CartLedger>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_line(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Copy of the ledger as it is right now.
    pub fn snapshot(&self) -> CartLedger {
        self.with_cart(|c| c.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, Product};

    #[test]
    fn test_clones_share_the_ledger() {
        let state = CartState::new();
        let other = state.clone();
        let tea = Product {
            id: 1,
            name: "Tea".to_string(),
            price: Money::from_cents(350),
            stock: 3,
        };

        state.with_cart_mut(|c| c.add_line(&tea)).unwrap();

        assert_eq!(other.with_cart(|c| c.total_quantity()), 1);
        assert_eq!(other.snapshot().total(), Money::from_cents(350));
    }
}
