use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use tracing::instrument;

use super::api::{parse_param, ApiResult, ApiState};
use crate::models::{OrderListResponse, OrderTab, OrderView, UpdateOrderStatusRequest};

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub tab: Option<String>,
    #[serde(alias = "query")]
    pub q: Option<String>,
}

/// Orders on one tab; counts cover every tab under the same search
#[instrument(name = "list_orders", skip(state), fields(tab = query.tab.as_deref()))]
pub async fn list_orders(
    State(state): State<ApiState>,
    Query(query): Query<ListOrdersQuery>,
) -> ApiResult<OrderListResponse> {
    let tab: OrderTab = parse_param(query.tab.as_deref())?;

    state
        .traced(
            "list_orders",
            state.order_service.list_orders(tab, query.q.as_deref()),
        )
        .await
}

#[instrument(name = "get_order", skip(state), fields(order_id = %order_id))]
pub async fn get_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<OrderView> {
    state
        .traced("get_order", state.order_service.get_order(&order_id))
        .await
}

#[instrument(name = "update_order_status", skip(state, request), fields(
    order_id = %order_id,
    action = %request.action,
))]
pub async fn update_order_status(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> ApiResult<OrderView> {
    crate::info_with_trace!("Updating order status");

    state
        .traced(
            "update_order_status",
            state.order_service.update_status(&order_id, request),
        )
        .await
}
