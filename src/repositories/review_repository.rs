use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::latency::SimulatedLatency;
use super::seed;
use crate::models::{PendingReview, RepositoryError, RepositoryResult, Review};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews written about the signed-in user
    async fn received(&self) -> RepositoryResult<Vec<Review>>;

    /// Reviews written by the signed-in user
    async fn given(&self) -> RepositoryResult<Vec<Review>>;

    /// Completed orders still waiting for a review
    async fn pending(&self) -> RepositoryResult<Vec<PendingReview>>;

    async fn find_pending_by_order(&self, order_id: &str)
        -> RepositoryResult<Option<PendingReview>>;

    /// Store `review` and clear the pending entry for `order_id` in one step.
    ///
    /// Fails with `NotFound` and stores nothing when the order is no longer pending.
    async fn submit(&self, order_id: &str, review: Review) -> RepositoryResult<Review>;
}

#[derive(Default)]
struct ReviewBook {
    received: Vec<Review>,
    given: Vec<Review>,
    pending: Vec<PendingReview>,
}

pub struct InMemoryReviewRepository {
    book: RwLock<ReviewBook>,
    latency: SimulatedLatency,
}

impl InMemoryReviewRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self::with_reviews(
            seed::received_reviews(),
            seed::given_reviews(),
            seed::pending_reviews(),
            latency,
        )
    }

    pub fn with_reviews(
        received: Vec<Review>,
        given: Vec<Review>,
        pending: Vec<PendingReview>,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            book: RwLock::new(ReviewBook {
                received,
                given,
                pending,
            }),
            latency,
        }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    #[instrument(skip(self))]
    async fn received(&self) -> RepositoryResult<Vec<Review>> {
        self.latency.before_read().await;
        Ok(self.book.read().await.received.clone())
    }

    #[instrument(skip(self))]
    async fn given(&self) -> RepositoryResult<Vec<Review>> {
        self.latency.before_read().await;
        Ok(self.book.read().await.given.clone())
    }

    #[instrument(skip(self))]
    async fn pending(&self) -> RepositoryResult<Vec<PendingReview>> {
        self.latency.before_read().await;
        Ok(self.book.read().await.pending.clone())
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn find_pending_by_order(
        &self,
        order_id: &str,
    ) -> RepositoryResult<Option<PendingReview>> {
        self.latency.before_read().await;
        let book = self.book.read().await;
        Ok(book.pending.iter().find(|p| p.order_id == order_id).cloned())
    }

    #[instrument(skip(self, review), fields(order_id = %order_id, review_id = %review.id))]
    async fn submit(&self, order_id: &str, review: Review) -> RepositoryResult<Review> {
        self.latency.before_write().await;
        let mut book = self.book.write().await;
        let index = book
            .pending
            .iter()
            .position(|p| p.order_id == order_id)
            .ok_or(RepositoryError::NotFound)?;
        book.pending.remove(index);
        // Most recent review first
        book.given.insert(0, review.clone());
        info!("Review stored");
        Ok(review)
    }
}
