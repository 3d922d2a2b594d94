use crate::domain::order::{Order, OrderId, OrderStatus};
use crate::domain::ports::{OrderStoreBox, ProductStoreBox};
use crate::domain::product::ProductId;
use crate::error::{OrderError, Result};

/// The main entry point for driving purchase orders.
///
/// `OrderService` owns the storage backends and performs one logical
/// transaction per public operation: load the aggregate (and, where
/// needed, the product), run the domain operation, and persist only on
/// success. A failed stock decrement therefore persists nothing.
pub struct OrderService {
    order_store: OrderStoreBox,
    product_store: ProductStoreBox,
}

impl OrderService {
    /// Creates a new `OrderService` instance.
    ///
    /// # Arguments
    ///
    /// * `order_store` - The store for order aggregates.
    /// * `product_store` - The product catalog.
    pub fn new(order_store: OrderStoreBox, product_store: ProductStoreBox) -> Self {
        Self {
            order_store,
            product_store,
        }
    }

    /// Creates a pending order for the customer and returns its assigned id.
    pub async fn create_order(
        &self,
        customer_name: &str,
        customer_email: &str,
    ) -> Result<OrderId> {
        let order = Order::create_pending(customer_name, customer_email)?;
        self.order_store.save(order).await
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order> {
        self.order_store
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::InvalidArgument(format!("unknown order {order_id}")))
    }

    /// Adds `quantity` units of a catalog product to the order, snapshotting
    /// the current price and decrementing stock.
    pub async fn add_product(
        &self,
        order_id: OrderId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<()> {
        let mut order = self.load_order(order_id).await?;
        let mut product = self.product_store.get(product_id).await?.ok_or_else(|| {
            OrderError::InvalidArgument(format!("unknown product {product_id}"))
        })?;

        order.add_product(&mut product, quantity)?;

        // Persist both sides only after the domain operation succeeded.
        self.product_store.put(product).await?;
        self.order_store.save(order).await?;
        Ok(())
    }

    /// Removes the first line for `product_id` from the order, if any.
    /// Stock is not restored on removal.
    pub async fn remove_product(&self, order_id: OrderId, product_id: &ProductId) -> Result<()> {
        let mut order = self.load_order(order_id).await?;
        let Some(line) = order
            .items()
            .iter()
            .find(|item| &item.product == product_id)
            .cloned()
        else {
            return Ok(());
        };
        order.remove_item(&line)?;
        self.order_store.save(order).await?;
        Ok(())
    }

    /// Runs checkout on the order: applies shipping/discount and moves it
    /// to `Processing`.
    pub async fn checkout(&self, order_id: OrderId, coupon_code: Option<&str>) -> Result<()> {
        let mut order = self.load_order(order_id).await?;
        order.final_checkout(coupon_code);
        self.order_store.save(order).await?;
        Ok(())
    }

    /// Moves the order to the given status. `Pending` is creation-only and
    /// is rejected.
    pub async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> Result<()> {
        let mut order = self.load_order(order_id).await?;
        match status {
            OrderStatus::Pending => {
                return Err(OrderError::InvalidArgument(
                    "orders are created pending; pending cannot be re-entered".to_string(),
                ));
            }
            OrderStatus::Processing => order.mark_as_processing(),
            OrderStatus::Shipped => order.mark_as_shipped(),
            OrderStatus::Delivered => order.mark_as_delivered(),
            OrderStatus::Cancelled => order.mark_as_cancelled(),
        }
        self.order_store.save(order).await?;
        Ok(())
    }

    /// Returns the order, if it exists.
    pub async fn order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.order_store.get(order_id).await
    }

    /// Consumes the service and returns the final state of all orders.
    pub async fn into_results(self) -> Result<Vec<Order>> {
        self.order_store.all().await
    }
}
