use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::product::Product;

/// Raw `shopping_cart` row for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct CartLine {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingCartItem {
    pub product: Product,
    pub quantity: i32,
    pub discount_percent: Decimal,
    pub line_total: Decimal,
}

impl ShoppingCartItem {
    pub fn new(product: Product, quantity: i32) -> Self {
        let discount_percent = Decimal::ZERO;
        let gross = product.price * Decimal::from(quantity);
        let discount = gross * discount_percent / Decimal::ONE_HUNDRED;
        let line_total = (gross - discount).round_dp(2);

        Self {
            product,
            quantity,
            discount_percent,
            line_total,
        }
    }

    pub fn product_id(&self) -> i32 {
        self.product.product_id
    }
}

/// Per-user cart, rebuilt from storage on every read. Items are keyed by
/// product id, so a product appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingCart {
    pub items: BTreeMap<i32, ShoppingCartItem>,
    pub total: Decimal,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, replacing any existing line for the same product.
    pub fn add(&mut self, item: ShoppingCartItem) {
        if let Some(previous) = self.items.insert(item.product_id(), item.clone()) {
            self.total -= previous.line_total;
        }
        self.total += item.line_total;
    }

    pub fn get(&self, product_id: i32) -> Option<&ShoppingCartItem> {
        self.items.get(&product_id)
    }

    pub fn contains(&self, product_id: i32) -> bool {
        self.items.contains_key(&product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
