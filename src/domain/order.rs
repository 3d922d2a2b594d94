use crate::domain::money::Money;
use crate::domain::product::{Product, ProductId};
use crate::error::{OrderError, Result};
use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Order identifier, assigned by the order store on first save.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// One product line within an order: product reference, quantity, and the
/// unit price snapshotted when the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Back-reference to the owning order. Navigation only; set and cleared
    /// by `Order`, `None` until the order has a store-assigned id.
    order: Option<OrderId>,
    pub product: ProductId,
    pub quantity: i64,
    price: Money,
}

impl OrderItem {
    pub fn new(product: ProductId, quantity: i64, price: Money) -> Self {
        Self {
            order: None,
            product,
            quantity,
            price,
        }
    }

    pub fn order(&self) -> Option<OrderId> {
        self.order
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Price times quantity, exact decimal. Fails only on overflow of the
    /// underlying representation.
    pub fn subtotal(&self) -> Result<Money> {
        self.price.checked_mul(self.quantity)
    }

    /// Two lines are the same when their visible content matches; the
    /// back-reference is ignored so a detached copy can identify a line.
    fn same_line(&self, other: &OrderItem) -> bool {
        self.product == other.product
            && self.quantity == other.quantity
            && self.price == other.price
    }
}

/// The purchase order aggregate root.
///
/// Owns the consistency of its items, total, and status: items are added
/// and removed only through these methods so that `total_amount` always
/// equals the sum of line subtotals, except immediately after
/// `final_checkout`, which overrides it with a shipping/discount-adjusted
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: Option<OrderId>,
    pub customer_name: String,
    pub customer_email: String,
    status: OrderStatus,
    order_date: DateTime<Utc>,
    items: Vec<OrderItem>,
    total_amount: Money,
}

impl Order {
    /// Creates a new order: `Pending`, stamped with the current time, no
    /// items, zero total. Fails with `ValidationError` when the customer
    /// name or email is empty.
    pub fn create_pending(
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
    ) -> Result<Self> {
        let customer_name = customer_name.into();
        let customer_email = customer_email.into();
        if customer_name.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "customer name must not be empty".to_string(),
            ));
        }
        if customer_email.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "customer email must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            customer_name,
            customer_email,
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            items: Vec::new(),
            total_amount: Money::ZERO,
        })
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Stamps the store-assigned id onto the order and the back-reference
    /// of every item added before the first save.
    pub(crate) fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
        for item in &mut self.items {
            item.order = Some(id);
        }
    }

    fn sum_subtotals(items: &[OrderItem]) -> Result<Money> {
        let mut total = Money::ZERO;
        for item in items {
            total = total.checked_add(item.subtotal()?)?;
        }
        Ok(total)
    }

    fn commit_item(&mut self, mut item: OrderItem, total: Money) {
        item.order = self.id;
        self.items.push(item);
        self.total_amount = total;
    }

    /// Appends an item, stamps its back-reference, and recomputes the
    /// total. The new total is computed before anything mutates, so a
    /// failed sum leaves the order untouched.
    pub fn add_item(&mut self, item: OrderItem) -> Result<()> {
        let total = Self::sum_subtotals(&self.items)?.checked_add(item.subtotal()?)?;
        self.commit_item(item, total);
        Ok(())
    }

    /// Removes the first line matching `item` (by product, quantity, and
    /// price), clears its back-reference, and recomputes the total. Returns
    /// the detached line, or `Ok(None)` as a no-op when nothing matches.
    /// The new total is computed before anything mutates, so a failed sum
    /// leaves the order untouched.
    pub fn remove_item(&mut self, item: &OrderItem) -> Result<Option<OrderItem>> {
        let Some(pos) = self.items.iter().position(|existing| existing.same_line(item)) else {
            return Ok(None);
        };
        let mut total = Money::ZERO;
        for (index, existing) in self.items.iter().enumerate() {
            if index != pos {
                total = total.checked_add(existing.subtotal()?)?;
            }
        }
        let mut removed = self.items.remove(pos);
        removed.order = None;
        self.total_amount = total;
        Ok(Some(removed))
    }

    /// Sets the total to the sum of all line subtotals, in insertion order.
    pub fn recalculate_total_amount(&mut self) -> Result<()> {
        self.total_amount = Self::sum_subtotals(&self.items)?;
        Ok(())
    }

    /// Decrements the product's stock, snapshots its current price into a
    /// new line, and appends it.
    ///
    /// Fails with `InvalidArgument` for a non-positive quantity and
    /// propagates `InsufficientStock` from the product; in both cases
    /// neither the order nor the product is modified.
    pub fn add_product(&mut self, product: &mut Product, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(OrderError::InvalidArgument(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        let item = OrderItem::new(product.id.clone(), quantity, product.price);
        // Run the arithmetic before touching stock so any failure leaves
        // both sides unchanged.
        let total = Self::sum_subtotals(&self.items)?.checked_add(item.subtotal()?)?;
        product.decrease_stock(quantity)?;
        self.commit_item(item, total);
        Ok(())
    }

    // Status setters apply unconditionally; there is no transition table,
    // so any status may move to any other.

    pub fn mark_as_processing(&mut self) {
        self.status = OrderStatus::Processing;
    }

    pub fn mark_as_shipped(&mut self) {
        self.status = OrderStatus::Shipped;
    }

    pub fn mark_as_delivered(&mut self) {
        self.status = OrderStatus::Delivered;
    }

    pub fn mark_as_cancelled(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    /// Applies shipping and any coupon discount, overrides the total with
    /// the result, and moves the order to `Processing`.
    ///
    /// Free shipping kicks in at a 100.00 subtotal, otherwise 5.00 is
    /// charged; coupon codes starting with "SALE" take 10.00 off.
    ///
    /// TODO: the subtotal is pinned to zero instead of being derived from
    /// the order's items, so the resulting total is always shipping minus
    /// discount (and goes negative with a coupon). Confirm the intended
    /// formula before changing this; tests pin the current behavior.
    pub fn final_checkout(&mut self, coupon_code: Option<&str>) {
        let subtotal = Money::ZERO;
        let shipping = if subtotal >= Money::new(dec!(100.00)) {
            Money::ZERO
        } else {
            Money::new(dec!(5.00))
        };
        let discount = match coupon_code {
            Some(code) if code.starts_with("SALE") => Money::new(dec!(10.00)),
            _ => Money::ZERO,
        };
        self.total_amount = subtotal + shipping - discount;
        self.status = OrderStatus::Processing;
    }
}
