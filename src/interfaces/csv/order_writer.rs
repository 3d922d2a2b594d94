use crate::domain::order::{Order, OrderStatus};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output row: `order, customer, email, status, items, total`.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OrderSummary {
    pub order: u64,
    pub customer: String,
    pub email: String,
    pub status: OrderStatus,
    pub items: usize,
    pub total: Decimal,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order: order.id().map(|id| id.0).unwrap_or_default(),
            customer: order.customer_name.clone(),
            email: order.customer_email.clone(),
            status: order.status(),
            items: order.items().len(),
            total: order.total_amount().value(),
        }
    }
}

/// Writes final order states as CSV, sorted by order id.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    /// Creates a new `OrderWriter` over any `Write` sink (e.g., Stdout).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_orders(&mut self, orders: Vec<Order>) -> Result<()> {
        let mut summaries: Vec<OrderSummary> =
            orders.iter().map(OrderSummary::from).collect();
        summaries.sort_by_key(|summary| summary.order);
        for summary in summaries {
            self.writer.serialize(summary)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::product::{Product, ProductId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_output_format() {
        let mut order = Order::create_pending("Alice", "alice@example.com").unwrap();
        let mut product = Product::new(ProductId::new("SKU-1"), Money::new(dec!(19.99)), 10);
        order.add_product(&mut product, 2).unwrap();

        let mut buffer = Vec::new();
        OrderWriter::new(&mut buffer)
            .write_orders(vec![order])
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "order,customer,email,status,items,total\n0,Alice,alice@example.com,pending,1,39.98\n"
        );
    }

    #[test]
    fn test_writer_sorts_by_order_id() {
        let store_like = |name: &str, email: &str| Order::create_pending(name, email).unwrap();
        let mut second = store_like("Bob", "bob@example.com");
        second.assign_id(crate::domain::order::OrderId(2));
        let mut first = store_like("Alice", "alice@example.com");
        first.assign_id(crate::domain::order::OrderId(1));

        let mut buffer = Vec::new();
        OrderWriter::new(&mut buffer)
            .write_orders(vec![second, first])
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("1,Alice"));
        assert!(lines[2].starts_with("2,Bob"));
    }
}
