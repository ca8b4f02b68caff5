use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::latency::SimulatedLatency;
use super::seed;
use crate::models::{Order, RepositoryError, RepositoryResult, ServiceResult};

/// Edit applied to a stored order while it is locked for writing
pub type OrderChange = Box<dyn FnOnce(&mut Order) -> ServiceResult<()> + Send>;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Order>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Order>>;

    /// Apply `change` to the stored order and keep the result only if it succeeds.
    ///
    /// Fails with `RepositoryError::NotFound` when the id is unknown.
    async fn update_with(&self, id: &str, change: OrderChange) -> ServiceResult<Order>;
}

pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
    latency: SimulatedLatency,
}

impl InMemoryOrderRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self::with_orders(seed::orders(), latency)
    }

    pub fn with_orders(orders: Vec<Order>, latency: SimulatedLatency) -> Self {
        Self {
            orders: RwLock::new(orders),
            latency,
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        self.latency.before_read().await;
        Ok(self.orders.read().await.clone())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Order>> {
        self.latency.before_read().await;
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    #[instrument(skip(self, change), fields(order_id = %id))]
    async fn update_with(&self, id: &str, change: OrderChange) -> ServiceResult<Order> {
        self.latency.before_write().await;
        let mut orders = self.orders.write().await;
        let slot = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let mut order = slot.clone();
        change(&mut order)?;
        *slot = order.clone();
        info!(status = %order.status, "Order updated");
        Ok(order)
    }
}
