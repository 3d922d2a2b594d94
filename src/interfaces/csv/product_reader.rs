use crate::domain::money::Money;
use crate::domain::product::{Product, ProductId};
use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of the product catalog CSV: `product, price, stock`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ProductRecord {
    pub product: String,
    pub price: Decimal,
    pub stock: i64,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product::new(
            ProductId::new(record.product),
            Money::new(record.price),
            record.stock,
        )
    }
}

/// Reads a product catalog from a CSV source.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    /// Creates a new `ProductReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes products.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|record: ProductRecord| record.into())
                .map_err(OrderError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_catalog() {
        let data = "product, price, stock\nSKU-1, 19.99, 10\nSKU-2, 4.50, 3";
        let reader = ProductReader::new(data.as_bytes());
        let products: Vec<Result<Product>> = reader.products().collect();

        assert_eq!(products.len(), 2);
        let first = products[0].as_ref().unwrap();
        assert_eq!(first.id, ProductId::new("SKU-1"));
        assert_eq!(first.price, Money::new(dec!(19.99)));
        assert_eq!(first.stock_quantity, 10);
    }

    #[test]
    fn test_reader_malformed_price() {
        let data = "product, price, stock\nSKU-1, cheap, 10";
        let reader = ProductReader::new(data.as_bytes());
        let products: Vec<Result<Product>> = reader.products().collect();

        assert!(products[0].is_err());
    }
}
