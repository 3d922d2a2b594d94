use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderStore, ProductStore};
use crate::domain::product::{Product, ProductId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory store for orders.
///
/// Uses `Arc<RwLock<HashMap<OrderId, Order>>>` to allow shared concurrent
/// access. Identifiers are assigned from a monotonically increasing counter
/// on first save.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, mut order: Order) -> Result<OrderId> {
        let id = match order.id() {
            Some(id) => id,
            None => {
                let id = OrderId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
                order.assign_id(id);
                id
            }
        };
        let mut orders = self.orders.write().await;
        orders.insert(id, order);
        Ok(id)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// A thread-safe in-memory product catalog.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn put(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_order_store_assigns_ids_on_first_save() {
        let store = InMemoryOrderStore::new();
        let first = Order::create_pending("Alice", "alice@example.com").unwrap();
        let second = Order::create_pending("Bob", "bob@example.com").unwrap();

        let id1 = store.save(first).await.unwrap();
        let id2 = store.save(second).await.unwrap();
        assert_ne!(id1, id2);

        let loaded = store.get(id1).await.unwrap().unwrap();
        assert_eq!(loaded.id(), Some(id1));
        assert_eq!(loaded.customer_name, "Alice");
    }

    #[tokio::test]
    async fn test_order_store_keeps_id_on_resave() {
        let store = InMemoryOrderStore::new();
        let order = Order::create_pending("Alice", "alice@example.com").unwrap();
        let id = store.save(order).await.unwrap();

        let mut loaded = store.get(id).await.unwrap().unwrap();
        loaded.mark_as_shipped();
        let resaved = store.save(loaded).await.unwrap();
        assert_eq!(resaved, id);

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_product_store_round_trip() {
        let store = InMemoryProductStore::new();
        let product = Product::new(ProductId::new("SKU-1"), Money::new(dec!(19.99)), 10);

        store.put(product.clone()).await.unwrap();
        let retrieved = store.get(&ProductId::new("SKU-1")).await.unwrap().unwrap();
        assert_eq!(retrieved, product);

        assert!(store.get(&ProductId::new("SKU-2")).await.unwrap().is_none());
    }
}
