use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    Order, OrderCounts, OrderListResponse, OrderTab, OrderView, RepositoryError, ServiceError,
    ServiceResult, UpdateOrderStatusRequest,
};
use crate::repositories::{OrderChange, OrderRepository};

/// Buyer-side order tracking
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Orders on one tab, narrowed by an optional query, with counts for every tab
    #[instrument(skip(self), fields(tab = %tab))]
    pub async fn list_orders(
        &self,
        tab: OrderTab,
        query: Option<&str>,
    ) -> ServiceResult<OrderListResponse> {
        let orders = self.repository.find_all().await?;
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let matching: Vec<&Order> = orders
            .iter()
            .filter(|order| query.map_or(true, |q| order.matches_query(q)))
            .collect();
        let counts = OrderCounts::tally(matching.iter().copied());

        let now = Utc::now();
        let orders: Vec<OrderView> = matching
            .into_iter()
            .filter(|order| tab.includes(order.status))
            .map(|order| order.clone().view(now))
            .collect();

        crate::info_with_trace!("Listing {} orders", orders.len());

        Ok(OrderListResponse {
            tab,
            orders,
            counts,
        })
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &str) -> ServiceResult<OrderView> {
        let order = self.find(id).await?;
        Ok(order.view(Utc::now()))
    }

    /// Move an order along its lifecycle and record the step on its timeline
    #[instrument(skip(self, request), fields(order_id = %id, action = %request.action))]
    pub async fn update_status(
        &self,
        id: &str,
        request: UpdateOrderStatusRequest,
    ) -> ServiceResult<OrderView> {
        let UpdateOrderStatusRequest { action, reason } = request;
        let now = Utc::now();

        // The transition check and the write happen under one lock
        let change: OrderChange =
            Box::new(move |order: &mut Order| order.apply_action(action, reason.as_deref(), now));
        let updated = match self.repository.update_with(id, change).await {
            Ok(order) => order,
            Err(ServiceError::Repository {
                source: RepositoryError::NotFound,
            }) => {
                crate::warn_with_trace!(order_id = %id, "Order not found");
                return Err(ServiceError::OrderNotFound { id: id.to_string() });
            }
            Err(e) => return Err(e),
        };

        crate::info_with_trace!(to = %updated.status, "Order status updated");
        Ok(updated.view(now))
    }

    async fn find(&self, id: &str) -> ServiceResult<Order> {
        match self.repository.find_by_id(id).await? {
            Some(order) => Ok(order),
            None => {
                crate::warn_with_trace!(order_id = %id, "Order not found");
                Err(ServiceError::OrderNotFound { id: id.to_string() })
            }
        }
    }
}
