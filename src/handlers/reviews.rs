use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::api::{parse_param, ApiError, ApiResult, ApiState};
use crate::models::{PendingReview, Review, ReviewForm, ReviewListResponse, ReviewTab};

#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    pub tab: Option<String>,
}

#[instrument(name = "list_reviews", skip(state), fields(tab = query.tab.as_deref()))]
pub async fn list_reviews(
    State(state): State<ApiState>,
    Query(query): Query<ListReviewsQuery>,
) -> ApiResult<ReviewListResponse> {
    let tab: ReviewTab = parse_param(query.tab.as_deref())?;

    state
        .traced("list_reviews", state.review_service.list_reviews(tab))
        .await
}

#[instrument(name = "pending_review", skip(state), fields(order_id = %order_id))]
pub async fn pending_review(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<PendingReview> {
    state
        .traced(
            "pending_review",
            state.review_service.pending_for_order(&order_id),
        )
        .await
}

/// Leave a review for a completed order awaiting one
#[instrument(name = "submit_review", skip(state, form), fields(order_id = %order_id))]
pub async fn submit_review(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
    Json(form): Json<ReviewForm>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    crate::info_with_trace!("Submitting review");

    state
        .traced(
            "submit_review",
            state.review_service.submit_review(&order_id, form),
        )
        .await
        .map(|review| (StatusCode::CREATED, review))
}
