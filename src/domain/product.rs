use crate::domain::money::Money;
use crate::error::{OrderError, Result};
use serde::{Deserialize, Serialize};

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog entry: unit price and the quantity currently on hand.
///
/// Orders snapshot the price at add-time; the only mutation an order ever
/// triggers here is `decrease_stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub price: Money,
    pub stock_quantity: i64,
}

impl Product {
    pub fn new(id: ProductId, price: Money, stock_quantity: i64) -> Self {
        Self {
            id,
            price,
            stock_quantity,
        }
    }

    /// Removes `quantity` units from stock if available.
    ///
    /// Fails with `InsufficientStock` without touching the stock level when
    /// the request exceeds what is on hand.
    pub fn decrease_stock(&mut self, quantity: i64) -> Result<()> {
        if quantity > self.stock_quantity {
            return Err(OrderError::InsufficientStock {
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget(stock: i64) -> Product {
        Product::new(ProductId::new("SKU-1"), Money::new(dec!(19.99)), stock)
    }

    #[test]
    fn test_decrease_stock_success() {
        let mut product = widget(10);
        product.decrease_stock(4).unwrap();
        assert_eq!(product.stock_quantity, 6);
    }

    #[test]
    fn test_decrease_stock_to_zero() {
        let mut product = widget(3);
        product.decrease_stock(3).unwrap();
        assert_eq!(product.stock_quantity, 0);
    }

    #[test]
    fn test_decrease_stock_insufficient() {
        let mut product = widget(3);
        let err = product.decrease_stock(5).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock {
                requested: 5,
                available: 3
            }
        ));
        // Failed decrement leaves the stock level unchanged.
        assert_eq!(product.stock_quantity, 3);
    }
}
