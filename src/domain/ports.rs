use crate::domain::order::{Order, OrderId};
use crate::domain::product::{Product, ProductId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists the order, assigning an identifier on first save. Returns
    /// the order's identifier.
    async fn save(&self, order: Order) -> Result<OrderId>;
    async fn get(&self, id: OrderId) -> Result<Option<Order>>;
    async fn all(&self) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn put(&self, product: Product) -> Result<()>;
    async fn get(&self, id: &ProductId) -> Result<Option<Product>>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type ProductStoreBox = Box<dyn ProductStore>;
